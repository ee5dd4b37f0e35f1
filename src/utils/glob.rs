//! Glob patterns over dotted names and member paths.
//!
//! `*` matches any run of characters (dots included), `?` a single character.
//! Everything else is literal, so method paths such as `p.C#m(int[])` can be
//! written as they appear in a diff.

use regex::Regex;

/// Compile a glob into an anchored regex.
pub fn compile_glob(pattern: &str) -> Result<Regex, String> {
    let mut regex_pattern = String::with_capacity(pattern.len() + 8);
    regex_pattern.push('^');
    let mut literal = String::new();
    for c in pattern.chars() {
        match c {
            '*' | '?' => {
                regex_pattern.push_str(&regex::escape(&literal));
                literal.clear();
                regex_pattern.push_str(if c == '*' { ".*" } else { "." });
            }
            _ => literal.push(c),
        }
    }
    regex_pattern.push_str(&regex::escape(&literal));
    regex_pattern.push('$');

    Regex::new(&regex_pattern).map_err(|e| format!("Invalid glob pattern '{pattern}': {e}"))
}

/// Compile a comma-separated list of globs, skipping empty entries.
pub fn compile_glob_list(patterns: &str) -> Result<Vec<Regex>, String> {
    patterns
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(compile_glob)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glob_matches(pattern: &str, text: &str) -> bool {
        compile_glob(pattern)
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }

    #[test]
    fn test_glob_matching() {
        assert!(glob_matches("com.example.*", "com.example.api"));
        assert!(glob_matches("com.example.*", "com.example.api.impl"));
        assert!(!glob_matches("com.example.*", "com.examplexapi"));
        assert!(glob_matches("I?", "IA"));
        assert!(!glob_matches("I?", "IAB"));
        assert!(glob_matches("Outer$Inner", "Outer$Inner"));
    }

    #[test]
    fn test_member_paths_are_literal() {
        assert!(glob_matches("p.C#m()", "p.C#m()"));
        assert!(!glob_matches("p.C#m()", "p.C#m"));
        assert!(glob_matches("p.C#m(int)", "p.C#m(int)"));
        assert!(!glob_matches("p.C#m(int)", "p.C#mint"));
        assert!(glob_matches("p.C#m(int[])", "p.C#m(int[])"));
        assert!(glob_matches("p.C#m(*)", "p.C#m(java.lang.String,int)"));
        assert!(!glob_matches("p.C#m(*)", "p.C#mx"));
        assert!(glob_matches("a+b|c", "a+b|c"));
    }

    #[test]
    fn test_glob_list() {
        let globs = compile_glob_list("Foo, Bar*,,").expect("valid list");
        assert_eq!(globs.len(), 2);
        assert!(globs[1].is_match("BarService"));
    }
}
