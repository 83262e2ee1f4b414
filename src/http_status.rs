/// A status as the transport writes it: `HTTP/1.1 {code} {text}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatus {
    pub code: u16,
    pub text: &'static str,
}

impl HttpStatus {
    pub const CONTINUE: HttpStatus = HttpStatus {
        code: 100,
        text: "Continue",
    };
    pub const SWITCHING_PROTOCOLS: HttpStatus = HttpStatus {
        code: 101,
        text: "Switching Protocols",
    };
    pub const OK: HttpStatus = HttpStatus {
        code: 200,
        text: "OK",
    };
    pub const CREATED: HttpStatus = HttpStatus {
        code: 201,
        text: "Created",
    };
    pub const ACCEPTED: HttpStatus = HttpStatus {
        code: 202,
        text: "Accepted",
    };
    pub const NO_CONTENT: HttpStatus = HttpStatus {
        code: 204,
        text: "No Content",
    };
    pub const RESET_CONTENT: HttpStatus = HttpStatus {
        code: 205,
        text: "Reset Content",
    };
    pub const PARTIAL_CONTENT: HttpStatus = HttpStatus {
        code: 206,
        text: "Partial Content",
    };
    pub const NOT_MODIFIED: HttpStatus = HttpStatus {
        code: 304,
        text: "Not Modified",
    };
    pub const BAD_REQUEST: HttpStatus = HttpStatus {
        code: 400,
        text: "Bad Request",
    };
    pub const NOT_FOUND: HttpStatus = HttpStatus {
        code: 404,
        text: "Not Found",
    };
    pub const METHOD_NOT_ALLOWED: HttpStatus = HttpStatus {
        code: 405,
        text: "Method Not Allowed",
    };
    pub const INTERNAL_SERVER_ERROR: HttpStatus = HttpStatus {
        code: 500,
        text: "Internal Server Error",
    };

    const NAMED: &'static [HttpStatus] = &[
        HttpStatus::CONTINUE,
        HttpStatus::SWITCHING_PROTOCOLS,
        HttpStatus::OK,
        HttpStatus::CREATED,
        HttpStatus::ACCEPTED,
        HttpStatus::NO_CONTENT,
        HttpStatus::RESET_CONTENT,
        HttpStatus::PARTIAL_CONTENT,
        HttpStatus::NOT_MODIFIED,
        HttpStatus::BAD_REQUEST,
        HttpStatus::NOT_FOUND,
        HttpStatus::METHOD_NOT_ALLOWED,
        HttpStatus::INTERNAL_SERVER_ERROR,
    ];

    /// Looks the code up in the statuses this transport knows by name.
    pub fn named(code: u16) -> Option<HttpStatus> {
        Self::NAMED.iter().copied().find(|status| status.code == code)
    }

    /// Codes whose responses never carry a body on the wire.
    pub const fn code_forbids_body(code: u16) -> bool {
        matches!(code, 204 | 205 | 304)
    }

    pub fn forbids_body(&self) -> bool {
        Self::code_forbids_body(self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_vocabulary_is_closed() {
        assert_eq!(HttpStatus::named(200), Some(HttpStatus::OK));
        assert_eq!(HttpStatus::named(405), Some(HttpStatus::METHOD_NOT_ALLOWED));
        assert_eq!(HttpStatus::named(103), None);
        assert_eq!(HttpStatus::named(199), None);
    }

    #[test]
    fn no_content_statuses_forbid_a_body() {
        assert!(HttpStatus::NO_CONTENT.forbids_body());
        assert!(HttpStatus::RESET_CONTENT.forbids_body());
        assert!(HttpStatus::NOT_MODIFIED.forbids_body());
        assert!(!HttpStatus::OK.forbids_body());
        assert!(!HttpStatus::CONTINUE.forbids_body());
    }
}
