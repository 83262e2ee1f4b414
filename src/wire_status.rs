use crate::error::StatusError;
use crate::http_status::HttpStatus;

/// Maps a code onto the status line the transport will write.
///
/// Codes the transport has no name for are still written verbatim, using
/// `fallback_reason` as the reason phrase. The numeric code is never replaced.
pub fn to_wire_status(code: u16, fallback_reason: &'static str) -> Result<HttpStatus, StatusError> {
    if !(100..=999).contains(&code) {
        return Err(StatusError::UnsupportedByTransport(code));
    }
    Ok(HttpStatus::named(code).unwrap_or(HttpStatus {
        code,
        text: fallback_reason,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_codes_use_the_transport_reason() {
        assert_eq!(to_wire_status(200, "ignored"), Ok(HttpStatus::OK));
        assert_eq!(to_wire_status(100, "ignored"), Ok(HttpStatus::CONTINUE));
    }

    #[test]
    fn unnamed_codes_are_forced_verbatim() {
        let early_hints = to_wire_status(103, "Early Hints").unwrap();
        assert_eq!(early_hints.code, 103);
        assert_eq!(early_hints.text, "Early Hints");

        let unassigned = to_wire_status(199, "Unassigned").unwrap();
        assert_eq!(unassigned.code, 199);

        let im_used = to_wire_status(226, "IM Used").unwrap();
        assert_eq!(im_used.code, 226);
    }

    #[test]
    fn codes_that_do_not_fit_a_status_line_are_rejected() {
        assert_eq!(
            to_wire_status(99, ""),
            Err(StatusError::UnsupportedByTransport(99))
        );
        assert_eq!(
            to_wire_status(1000, ""),
            Err(StatusError::UnsupportedByTransport(1000))
        );
    }
}
