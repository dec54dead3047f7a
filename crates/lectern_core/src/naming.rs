//! Category name codec.
//!
//! A course's lock and visibility state is encoded into its guild-visible
//! category name as a prefix of marker glyphs. The codec is pure and is the
//! single place that knows the marker alphabet; handlers never concatenate
//! marker strings themselves.
//!
//! `decode_course_name` is the exact inverse of `encode_category_name` for
//! every combination of state flags.

/// Marker glyph prefixed to a locked course's category name.
pub const LOCKED_MARKER: &str = "🔒";

/// Marker glyph prefixed to a hidden course's category name.
pub const HIDDEN_MARKER: &str = "🙈";

/// Name suffix of the auto-provisioned announcement channel.
pub const ANNOUNCEMENT: &str = "announcement";

/// Encode a course name and its state flags into a category display name.
///
/// Unlocked and visible courses carry no markers; the lock marker precedes
/// the hidden marker when both apply.
///
/// # Example
/// ```
/// use lectern_core::naming::encode_category_name;
///
/// assert_eq!(encode_category_name("CS101", false, false), "CS101");
/// assert_eq!(encode_category_name("CS101", true, true), "🔒🙈 CS101");
/// ```
pub fn encode_category_name(course_name: &str, locked: bool, hidden: bool) -> String {
    compose(&markers_for(locked, hidden), course_name)
}

/// Strip marker glyphs and surrounding whitespace from a category display
/// name, returning the logical course name.
///
/// Whether the result names a known course is the caller's record lookup to
/// make; the codec only undoes the encoding.
pub fn decode_course_name(category_name: &str) -> String {
    let mut rest = category_name.trim_start();
    loop {
        if let Some(stripped) = rest.strip_prefix(LOCKED_MARKER) {
            rest = stripped.trim_start();
        } else if let Some(stripped) = rest.strip_prefix(HIDDEN_MARKER) {
            rest = stripped.trim_start();
        } else {
            break;
        }
    }
    rest.trim().to_string()
}

/// Extract the marker prefix of a category display name.
///
/// The rename handler recombines this prefix with the new course name so an
/// in-flight rename preserves the existing lock/hidden state.
pub fn marker_prefix(category_name: &str) -> String {
    let mut prefix = String::new();
    let mut rest = category_name.trim_start();
    loop {
        if let Some(stripped) = rest.strip_prefix(LOCKED_MARKER) {
            prefix.push_str(LOCKED_MARKER);
            rest = stripped.trim_start();
        } else if let Some(stripped) = rest.strip_prefix(HIDDEN_MARKER) {
            prefix.push_str(HIDDEN_MARKER);
            rest = stripped.trim_start();
        } else {
            break;
        }
    }
    prefix
}

/// Join a marker prefix and a course name into a category display name.
pub fn compose(prefix: &str, course_name: &str) -> String {
    if prefix.is_empty() {
        course_name.to_string()
    } else {
        format!("{prefix} {course_name}")
    }
}

/// Derive the guild channel name for a course channel suffix, e.g.
/// `CS101` + `announcement` → `CS101_announcement`.
pub fn course_channel_name(course_name: &str, suffix: &str) -> String {
    format!("{course_name}_{suffix}")
}

fn markers_for(locked: bool, hidden: bool) -> String {
    let mut markers = String::new();
    if locked {
        markers.push_str(LOCKED_MARKER);
    }
    if hidden {
        markers.push_str(HIDDEN_MARKER);
    }
    markers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_inverts_encode_for_all_flags() {
        for locked in [false, true] {
            for hidden in [false, true] {
                let encoded = encode_category_name("Ohjelmointi 1", locked, hidden);
                assert_eq!(decode_course_name(&encoded), "Ohjelmointi 1");
            }
        }
    }

    #[test]
    fn unlocked_visible_has_no_markers() {
        assert_eq!(encode_category_name("CS101", false, false), "CS101");
    }

    #[test]
    fn lock_marker_precedes_hidden_marker() {
        assert_eq!(encode_category_name("CS101", true, true), "🔒🙈 CS101");
        assert_eq!(encode_category_name("CS101", false, true), "🙈 CS101");
        assert_eq!(encode_category_name("CS101", true, false), "🔒 CS101");
    }

    #[test]
    fn marker_prefix_survives_rename() {
        let encoded = encode_category_name("CS101", true, true);
        let prefix = marker_prefix(&encoded);
        let renamed = compose(&prefix, "CS102");
        assert_eq!(renamed, "🔒🙈 CS102");
        assert_eq!(decode_course_name(&renamed), "CS102");
    }

    #[test]
    fn marker_prefix_empty_without_markers() {
        assert_eq!(marker_prefix("CS101"), "");
        assert_eq!(compose("", "CS101"), "CS101");
    }

    #[test]
    fn decode_tolerates_extra_whitespace() {
        assert_eq!(decode_course_name("🔒  CS101 "), "CS101");
    }

    #[test]
    fn channel_names_carry_course_prefix() {
        assert_eq!(course_channel_name("CS101", ANNOUNCEMENT), "CS101_announcement");
    }
}
