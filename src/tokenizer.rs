/// Splits an input segment into tokens, resolving quotes and escapes.
///
/// Single quotes take everything literally. Inside double quotes a backslash
/// escapes only `\`, `"`, `$` and newline; before anything else it stays in
/// the token. Outside quotes a backslash escapes whatever follows, including
/// whitespace and quote characters. Quote characters themselves never reach
/// the output, and an unterminated quote just flushes what was collected.
pub fn tokenize(input: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;

    for c in input.chars() {
        if escaped {
            if in_double {
                match c {
                    '\\' | '"' | '$' | '\n' => current.push(c),
                    _ => {
                        // Not escapable here, the backslash stays.
                        current.push('\\');
                        current.push(c);
                    }
                }
            } else {
                current.push(c);
            }
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_single => current.push(c),
            '\\' => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            ' ' | '\t' if !in_single && !in_double => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(c),
        }
    }

    // Unterminated quotes and a trailing lone backslash are tolerated:
    // whatever was collected becomes the final token.
    if !current.is_empty() {
        tokens.push(current);
    }
    tokens
}
