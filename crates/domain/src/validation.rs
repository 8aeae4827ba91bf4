// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;

/// Maximum length of the free-text special requests field.
const SPECIAL_REQUESTS_MAX_LEN: usize = 500;

/// Maximum length of a status-change reason.
const REASON_MAX_LEN: usize = 200;

/// Validates a guest name.
///
/// # Errors
///
/// Returns an error if the trimmed name is shorter than 2 or longer than
/// 50 characters.
pub fn validate_guest_name(guest_name: &str) -> Result<(), DomainError> {
    let len: usize = guest_name.trim().chars().count();
    if !(2..=50).contains(&len) {
        return Err(DomainError::InvalidGuestName(String::from(
            "Guest name must be between 2 and 50 characters",
        )));
    }
    Ok(())
}

/// Validates a phone number against the mobile-number pattern.
///
/// Accepted numbers are exactly 11 digits, start with `1`, and have a
/// second digit in `3..=9`.
///
/// # Errors
///
/// Returns an error if the number does not match the pattern.
pub fn validate_phone_number(phone_number: &str) -> Result<(), DomainError> {
    let bytes: &[u8] = phone_number.as_bytes();
    let valid: bool = bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes.first() == Some(&b'1')
        && matches!(bytes.get(1), Some(b'3'..=b'9'));

    if valid {
        Ok(())
    } else {
        Err(DomainError::InvalidPhoneNumber(String::from(
            "Phone number must be a valid 11-digit mobile number",
        )))
    }
}

/// Validates an email address.
///
/// The rule checks shape only: no whitespace, exactly one `@` with a
/// non-empty local part, and a domain part containing a dot with characters
/// on both sides.
///
/// # Errors
///
/// Returns an error if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let malformed = || {
        DomainError::InvalidEmail(String::from(
            "Email must be a valid address such as guest@example.com",
        ))
    };

    if email.chars().any(char::is_whitespace) {
        return Err(malformed());
    }

    let (local, domain) = email.split_once('@').ok_or_else(malformed)?;
    if local.is_empty() || domain.contains('@') {
        return Err(malformed());
    }

    let (domain_name, tld) = domain.rsplit_once('.').ok_or_else(malformed)?;
    if domain_name.is_empty() || tld.is_empty() {
        return Err(malformed());
    }

    Ok(())
}

/// Validates a table size.
///
/// # Errors
///
/// Returns an error if the size is not between 1 and 20 people.
pub fn validate_table_size(size: u8) -> Result<(), DomainError> {
    if !(1..=20).contains(&size) {
        return Err(DomainError::InvalidTableSize { size });
    }
    Ok(())
}

/// Validates the optional special requests text.
///
/// # Errors
///
/// Returns an error if the text exceeds 500 characters.
pub fn validate_special_requests(special_requests: &str) -> Result<(), DomainError> {
    if special_requests.chars().count() > SPECIAL_REQUESTS_MAX_LEN {
        return Err(DomainError::InvalidSpecialRequests(format!(
            "Special requests must be at most {SPECIAL_REQUESTS_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Validates a status-change reason.
///
/// # Errors
///
/// Returns an error if the trimmed reason is empty or exceeds 200 characters.
pub fn validate_reason(reason: &str) -> Result<(), DomainError> {
    if reason.trim().is_empty() {
        return Err(DomainError::MissingReason);
    }
    if reason.chars().count() > REASON_MAX_LEN {
        return Err(DomainError::InvalidReason(format!(
            "Reason must be at most {REASON_MAX_LEN} characters"
        )));
    }
    Ok(())
}
