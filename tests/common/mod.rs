// 集成测试公共模块
//
// 提供测试辅助工具和共享功能

use sheetloc::core::{localize_document_from_data, LocalizedDocument, SheetlocOptions};

/// HTML测试工具
pub struct HtmlTestHelper;

impl HtmlTestHelper {
    /// 使用默认选项运行完整标注流程（关闭元数据注释，便于输出比较）
    pub fn annotate(html: &str) -> (String, serde_json::Value) {
        Self::annotate_with(html, Self::comparable_options())
    }

    /// 使用给定选项运行完整标注流程
    pub fn annotate_with(html: &str, options: SheetlocOptions) -> (String, serde_json::Value) {
        let result = Self::annotate_raw(html, options);
        let html_out = String::from_utf8(result.html).expect("output should be UTF-8");
        let mapping =
            serde_json::from_str(&result.mapping_json).expect("mapping should be valid JSON");

        (html_out, mapping)
    }

    /// 运行流程并返回完整结果（需要统计信息的测试用）
    pub fn annotate_raw(html: &str, options: SheetlocOptions) -> LocalizedDocument {
        localize_document_from_data(&options, html.as_bytes().to_vec(), None, None)
            .expect("annotation should succeed")
    }

    /// 关闭元数据注释的默认选项
    pub fn comparable_options() -> SheetlocOptions {
        SheetlocOptions {
            no_metadata: true,
            silent: true,
            ..Default::default()
        }
    }

    /// 一个有代表性的人物卡片段
    pub fn create_sheet_snippet() -> String {
        r#"<!DOCTYPE html>
<html>
<head>
    <title>Character Sheet</title>
    <meta charset="UTF-8">
</head>
<body>
    <div class="sheet-header">
        <h1>Earthdawn Character</h1>
        <label>Character Name</label>
        <input type="text" name="attr_name" placeholder="Enter name">
    </div>
    <div class="sheet-stats">
        <span>Damage</span>
        <span title="@{dmg}">5</span>
        <input type="text" name="attr_health" value="@{health}" readonly>
        <button type="roll" value="%{init}">Roll Initiative</button>
    </div>
    <script>var secret = "Never Translate Me";</script>
</body>
</html>"#
            .to_string()
    }
}
