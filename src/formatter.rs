//! Three-line ASCII rendering of an equation.

/// Rows of the 3×3 block for one character. Characters outside the alphabet are blank.
fn glyph_rows(ch: char) -> [&'static str; 3] {
    match ch {
        '0' => [" _ ", "| |", "|_|"],
        '1' => ["   ", "  |", "  |"],
        '2' => [" _ ", " _|", "|_ "],
        '3' => [" _ ", " _|", " _|"],
        '4' => ["   ", "|_|", "  |"],
        '5' => [" _ ", "|_ ", " _|"],
        '6' => [" _ ", "|_ ", "|_|"],
        '7' => [" _ ", "  |", "  |"],
        '8' => [" _ ", "|_|", "|_|"],
        '9' => [" _ ", "|_|", " _|"],
        '+' => ["   ", "   ", " + "],
        '-' => ["   ", "   ", " - "],
        'x' | '*' | '×' => ["   ", "   ", " x "],
        '/' => ["   ", "  /", " / "],
        '=' => ["   ", "---", "---"],
        _ => ["   ", "   ", "   "],
    }
}

/// Render `equation` as three lines joined by `\n`, three columns per character.
///
/// ```
/// use matchstick::formatter::matchstick_formatter;
///
/// let art = matchstick_formatter("1+1=2");
/// assert_eq!(3, art.lines().count());
/// assert!(art.lines().all(|line| line.len() == 15));
/// ```
pub fn matchstick_formatter(equation: &str) -> String {
    let mut lines = [String::new(), String::new(), String::new()];
    for ch in equation.chars() {
        for (line, row) in lines.iter_mut().zip(glyph_rows(ch)) {
            line.push_str(row);
        }
    }
    lines.join("\n")
}
