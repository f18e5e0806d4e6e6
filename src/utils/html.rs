use std::collections::HashSet;

/// Reduces untrusted text (e.g. generated challenge prompts) to plain text.
///
/// Uses ammonia with an empty tag whitelist: markup is dropped, text is kept,
/// and the contents of <script>/<style> are removed entirely.
pub fn sanitize_text(input: &str) -> String {
    let mut builder = ammonia::Builder::default();
    builder.tags(HashSet::new());
    builder.clean(input).to_string().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_markup_but_keeps_text() {
        assert_eq!(sanitize_text("<b>Plante</b> uma árvore"), "Plante uma árvore");
    }

    #[test]
    fn drops_script_content() {
        assert_eq!(sanitize_text("<script>alert(1)</script>Recicle papel"), "Recicle papel");
    }
}
