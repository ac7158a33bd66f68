use std::io::{self, Write};

use thiserror::Error;

/// Rejections surfaced to the user before any network or store call.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Please enter a search term")]
    EmptySearch,
    #[error("Please enter at least one stock symbol")]
    EmptySymbols,
    #[error("Watchlist name is required")]
    EmptyListName,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// A search query must contain something other than whitespace.
pub fn search_query(input: &str) -> Result<String, FormError> {
    let query = input.trim();
    if query.is_empty() {
        return Err(FormError::EmptySearch);
    }
    Ok(query.to_string())
}

/// Splits comma-separated ticker input, dropping blanks and uppercasing.
pub fn symbol_list(input: &str) -> Result<Vec<String>, FormError> {
    let symbols: Vec<String> = input
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();

    if symbols.is_empty() {
        return Err(FormError::EmptySymbols);
    }
    Ok(symbols)
}

pub fn list_name(input: &str) -> Result<String, FormError> {
    let name = input.trim();
    if name.is_empty() {
        return Err(FormError::EmptyListName);
    }
    Ok(name.to_string())
}

/// Signup only goes through when both password entries agree exactly.
pub fn matching_passwords(password: &str, confirmation: &str) -> Result<(), FormError> {
    if password != confirmation {
        return Err(FormError::PasswordMismatch);
    }
    Ok(())
}

pub fn accepted(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Blocking yes/no prompt. Anything but an explicit yes declines.
pub fn confirm(prompt: &str) -> io::Result<bool> {
    print!("{prompt} [y/N] ");
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(accepted(&answer))
}

pub fn prompt_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_rejected() {
        assert_eq!(search_query(""), Err(FormError::EmptySearch));
        assert_eq!(search_query("   \t"), Err(FormError::EmptySearch));
    }

    #[test]
    fn search_query_is_trimmed() {
        assert_eq!(search_query(" apple "), Ok("apple".to_string()));
    }

    #[test]
    fn symbol_input_is_split_and_uppercased() {
        assert_eq!(
            symbol_list("tsla, msft,"),
            Ok(vec!["TSLA".to_string(), "MSFT".to_string()])
        );
    }

    #[test]
    fn blank_symbol_input_is_rejected() {
        assert_eq!(symbol_list(""), Err(FormError::EmptySymbols));
        assert_eq!(symbol_list(" , ,"), Err(FormError::EmptySymbols));
    }

    #[test]
    fn blank_list_name_is_rejected() {
        assert_eq!(list_name("  "), Err(FormError::EmptyListName));
        assert_eq!(list_name(" tech "), Ok("tech".to_string()));
    }

    #[test]
    fn mismatched_passwords_are_rejected() {
        assert_eq!(
            matching_passwords("hunter2", "hunter3"),
            Err(FormError::PasswordMismatch)
        );
        assert_eq!(matching_passwords("hunter2", "hunter2"), Ok(()));
    }

    #[test]
    fn only_an_explicit_yes_accepts() {
        assert!(accepted("y"));
        assert!(accepted("Yes\n"));
        assert!(!accepted(""));
        assert!(!accepted("n"));
        assert!(!accepted("sure"));
    }
}
