//! Post-assembly artifact checks.
//!
//! The typed fragment catalogue makes these failures unconstructible in the
//! normal path; the checks run over the final text anyway so no artifact with
//! a leftover substitution marker or an unmatched guard can ever be handed
//! back.

use crate::error::{GenerateError, GenerateResult};

/// Validate one assembled artifact before it is returned or written.
pub fn validate_artifact(artifact: &str, text: &str) -> GenerateResult<()> {
    if let Some(marker) = find_marker(text) {
        return Err(GenerateError::UnresolvedPlaceholder {
            artifact: artifact.to_string(),
            marker,
        });
    }
    check_guard_balance(artifact, text)
}

/// Scan for a `%Marker%`-style substitution residue.
fn find_marker(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut start = None;
    for (i, &b) in bytes.iter().enumerate() {
        match (start, b) {
            (None, b'%') => start = Some(i),
            (Some(s), b'%') => {
                // A marker is two percent signs around a non-empty
                // identifier.
                if i > s + 1 {
                    return Some(text[s..=i].to_string());
                }
                start = Some(i);
            }
            (Some(_), c) if c.is_ascii_alphanumeric() || c == b'_' => {}
            (Some(_), _) => start = None,
            _ => {}
        }
    }
    None
}

/// Every `#if`-family line must close with a matching `#endif`, and the
/// nesting depth must never go negative.
fn check_guard_balance(artifact: &str, text: &str) -> GenerateResult<()> {
    let mut opens = 0usize;
    let mut closes = 0usize;
    let mut depth = 0isize;

    for line in text.lines() {
        let line = line.trim_start();
        if line.starts_with("#if") {
            opens += 1;
            depth += 1;
        } else if line.starts_with("#endif") {
            closes += 1;
            depth -= 1;
            if depth < 0 {
                return Err(GenerateError::UnbalancedGuards {
                    artifact: artifact.to_string(),
                    opens,
                    closes,
                });
            }
        }
    }

    if depth != 0 {
        return Err(GenerateError::UnbalancedGuards {
            artifact: artifact.to_string(),
            opens,
            closes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_artifact_passes() {
        let text = "#if defined(_WIN32)\n    uint32    winFlag;\n#endif\n";
        assert!(validate_artifact("header", text).is_ok());
    }

    #[test]
    fn test_leftover_marker_is_caught() {
        let text = "static const char* pFlagStr = %SettingStrName%;\n";
        match validate_artifact("header", text) {
            Err(GenerateError::UnresolvedPlaceholder { marker, .. }) => {
                assert_eq!(marker, "%SettingStrName%");
            }
            other => panic!("expected placeholder error, got {:?}", other),
        }
    }

    #[test]
    fn test_percent_in_string_literal_is_not_a_marker() {
        // Percent followed by non-identifier text never forms a marker.
        let text = "strncpy(m_settings.fmt, \"%d %s\", 16);\n";
        assert!(validate_artifact("source", text).is_ok());
    }

    #[test]
    fn test_unclosed_guard_is_caught() {
        let text = "#if defined(_WIN32)\n    uint32    winFlag;\n";
        assert!(matches!(
            validate_artifact("header", text),
            Err(GenerateError::UnbalancedGuards {
                opens: 1,
                closes: 0,
                ..
            })
        ));
    }

    #[test]
    fn test_stray_endif_is_caught() {
        let text = "    uint32    flag;\n#endif\n";
        assert!(matches!(
            validate_artifact("source", text),
            Err(GenerateError::UnbalancedGuards { .. })
        ));
    }

    #[test]
    fn test_non_guard_directives_are_ignored() {
        let text = "#pragma once\n#include \"pal.h\"\n";
        assert!(validate_artifact("header", text).is_ok());
    }
}
