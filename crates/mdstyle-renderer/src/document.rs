//! Assembly of the rendered body into the styled container.

use mdstyle_theme::{ElementKind, StyleMap};

use crate::renderer::RenderResult;

/// Style block appended after every document.
pub const DECORATION_STYLE: &str = "<style>\
.preview-wrapper pre::before {\
position: absolute;\
top: 0;\
right: 0;\
color: #ccc;\
text-align: center;\
font-size: 0.8em;\
padding: 5px 10px 0;\
line-height: 15px;\
height: 15px;\
font-weight: 600;\
}\
</style>";

/// Style block that reveals the window-dots marker on code blocks.
pub const MAC_CODE_STYLE: &str = "<style>\
.hljs.code__pre > .mac-sign {\
display: flex;\
}\
.code__pre {\
padding: 0 !important;\
}\
.hljs.code__pre code {\
display: -webkit-box;\
padding: 0.5em 1em 1em;\
overflow-x: auto;\
text-indent: 0;\
}\
</style>";

/// Wrap a rendered body into the document container.
///
/// The body's first style attribute loses its top margin so the document
/// starts flush, then the citation section and style blocks are appended.
pub fn assemble(result: &RenderResult, styles: &StyleMap, mac_code_blocks: bool) -> String {
    let mut content = flush_first_margin(&result.html);
    content.push_str(&result.footnotes);
    content.push_str(DECORATION_STYLE);
    if mac_code_blocks {
        content.push_str(MAC_CODE_STYLE);
    }
    format!(
        "<section{}>{content}</section>",
        styles.attr(ElementKind::Container)
    )
}

/// Append `;margin-top: 0` to the first `style="…"` attribute.
fn flush_first_margin(html: &str) -> String {
    const OPEN: &str = "style=\"";
    let Some(start) = html.find(OPEN) else {
        return html.to_owned();
    };
    let value_start = start + OPEN.len();
    let Some(len) = html[value_start..].find('"') else {
        return html.to_owned();
    };
    let close = value_start + len;
    format!("{};margin-top: 0{}", &html[..close], &html[close..])
}
