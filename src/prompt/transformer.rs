//! Prompt augmentation with a fixed chibi style suffix.
//!
//! The user's text is kept as-is and the style descriptors are appended, so
//! the remote model always sees the same style contract no matter what the
//! user typed. No validation happens here; that is the proxy's job.

/// Appended to every prompt before it is sent upstream.
pub const CHIBI_STYLE_SUFFIX: &str = ", chibi style, cute kawaii character, big eyes, \
small body proportions, adorable, anime chibi art style, pastel colors, soft lighting, \
high quality digital art";

/// Build the model-ready prompt for `raw_prompt`.
pub fn transform(raw_prompt: &str) -> String {
    let mut augmented = String::with_capacity(raw_prompt.len() + CHIBI_STYLE_SUFFIX.len());
    augmented.push_str(raw_prompt);
    augmented.push_str(CHIBI_STYLE_SUFFIX);
    augmented
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn appends_style_suffix_to_prompt() {
        assert_eq!(
            transform("a red dragon"),
            "a red dragon, chibi style, cute kawaii character, big eyes, small body proportions, \
             adorable, anime chibi art style, pastel colors, soft lighting, high quality digital art"
        );
    }

    #[test]
    fn is_deterministic() {
        for s in ["cat", "", "  spaced  ", "ドラゴン", "{\"inputs\": 1}"] {
            assert_eq!(transform(s), transform(s));
        }
    }

    #[test]
    fn keeps_prompt_as_prefix() {
        for s in ["cat", "a knight with a sword", "  leading space", "emoji 🐉"] {
            let out = transform(s);
            assert!(out.starts_with(s));
            assert!(out.ends_with(CHIBI_STYLE_SUFFIX));
            assert_eq!(out.len(), s.len() + CHIBI_STYLE_SUFFIX.len());
        }
    }

    #[test]
    fn empty_input_yields_bare_suffix() {
        assert_eq!(transform(""), CHIBI_STYLE_SUFFIX);
    }
}
