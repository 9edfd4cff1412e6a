use codeblock_core::highlight::SyntectHighlighter;

pub fn list() {
    for name in SyntectHighlighter::theme_names() {
        println!("{name}");
    }
}
