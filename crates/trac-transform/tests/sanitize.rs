//! Property tests for text sanitizing.

use proptest::prelude::*;

use trac_transform::{Quoting, sanitize};

proptest! {
    #[test]
    fn plain_text_without_markup_is_unchanged(text in "[^'\"]*") {
        prop_assert_eq!(sanitize(&text, Quoting::Plain), text);
    }

    #[test]
    fn quoted_output_is_wrapped_once(text in "[^\"]{1,40}") {
        let quoted = sanitize(&text, Quoting::Quoted);
        prop_assert!(quoted.starts_with('"') && quoted.ends_with('"'));
        prop_assert!(!quoted[1..quoted.len() - 1].contains('"'));
    }
}
