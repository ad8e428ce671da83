//! Implicit environment keys derived from field names

/// Convert a field name to MACRO_CASE.
///
/// Works for both `snake_case` and `CamelCase` names, keeping acronyms
/// together: `max_conns` and `MaxConns` become `MAX_CONNS`, `TLSEnabled`
/// becomes `TLS_ENABLED`.
pub fn macro_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            let word_start = prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower);
            if word_start && !out.ends_with('_') {
                out.push('_');
            }
        }
        out.extend(c.to_uppercase());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_case() {
        assert_eq!(macro_case("max_conns"), "MAX_CONNS");
        assert_eq!(macro_case("host"), "HOST");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(macro_case("MaxConns"), "MAX_CONNS");
        assert_eq!(macro_case("maxConns"), "MAX_CONNS");
        assert_eq!(macro_case("Host"), "HOST");
    }

    #[test]
    fn test_acronyms() {
        assert_eq!(macro_case("TLSEnabled"), "TLS_ENABLED");
        assert_eq!(macro_case("DatabaseURL"), "DATABASE_URL");
        assert_eq!(macro_case("ID"), "ID");
    }

    #[test]
    fn test_digits() {
        assert_eq!(macro_case("db2Host"), "DB2_HOST");
        assert_eq!(macro_case("http2"), "HTTP2");
    }

    #[test]
    fn test_existing_underscores_are_not_doubled() {
        assert_eq!(macro_case("Max_Conns"), "MAX_CONNS");
        assert_eq!(macro_case("already_MACRO"), "ALREADY_MACRO");
    }
}
