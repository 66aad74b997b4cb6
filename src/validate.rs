//! Submission validation
//!
//! Required-field checks and the permissive email-syntax check applied to
//! contact-form submissions.

use crate::handler::Submission;

/// Names of required fields that are empty or missing in the submission.
///
/// `company` and `service` are optional and never reported here.
pub fn missing_required_fields(submission: &Submission) -> Vec<&'static str> {
    let mut missing = Vec::new();
    if submission.name.trim().is_empty() {
        missing.push("name");
    }
    if submission.email.trim().is_empty() {
        missing.push("email");
    }
    if submission.message.trim().is_empty() {
        missing.push("message");
    }
    missing
}

/// Check the `local@domain.tld` shape.
///
/// Deliberately permissive: one non-whitespace, non-`@` run before the `@`,
/// one after it, then a literal `.` followed by a trailing run. Real
/// address verification is the email provider's problem.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || !is_clean_run(local) {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && is_clean_run(domain)
}

fn is_clean_run(s: &str) -> bool {
    !s.chars().any(|c| c.is_whitespace() || c == '@')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, email: &str, message: &str) -> Submission {
        Submission {
            name: name.to_string(),
            email: email.to_string(),
            company: String::new(),
            service: String::new(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_all_required_fields_present() {
        let s = submission("Jane", "jane@x.com", "Hi");
        assert!(missing_required_fields(&s).is_empty());
    }

    #[test]
    fn test_missing_fields_are_named() {
        let s = submission("Jane", "", "");
        assert_eq!(missing_required_fields(&s), vec!["email", "message"]);
    }

    #[test]
    fn test_whitespace_only_counts_as_missing() {
        let s = submission("   ", "jane@x.com", "Hi");
        assert_eq!(missing_required_fields(&s), vec!["name"]);
    }

    #[test]
    fn test_valid_emails() {
        assert!(is_valid_email("jane@x.com"));
        assert!(is_valid_email("a.b+c@mail.example.org"));
        assert!(is_valid_email("user@sub.domain.co"));
    }

    #[test]
    fn test_invalid_emails() {
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email("jane@"));
        assert!(!is_valid_email("jane@x"));
        assert!(!is_valid_email("jane@x."));
        assert!(!is_valid_email("jane@.com"));
        assert!(!is_valid_email("ja ne@x.com"));
        assert!(!is_valid_email("jane@x com.org"));
        assert!(!is_valid_email("jane@x@y.com"));
        assert!(!is_valid_email(""));
    }
}
