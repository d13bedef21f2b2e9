//! 사용자용 출력 (error / info / success / message)
//!
//! 로그(tracing)와 별개로 항상 출력됩니다. 터미널이 아니면 색을 쓰지 않습니다.

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{self, IsTerminal, Write};

pub struct Pretty {
    stdout_color: bool,
    stderr_color: bool,
}

impl Pretty {
    pub fn new() -> Self {
        Self {
            stdout_color: io::stdout().is_terminal(),
            stderr_color: io::stderr().is_terminal(),
        }
    }

    /// `{kind}: {message}` (kind는 굵은 빨강, stderr)
    pub fn error(&self, kind: &str, message: &str) {
        let _ = styled(
            &mut io::stderr(),
            self.stderr_color,
            Color::Red,
            &format!("{}: ", kind),
            message,
        );
    }

    pub fn info(&self, message: &str) {
        let _ = styled(&mut io::stdout(), self.stdout_color, Color::Cyan, message, "");
    }

    pub fn success(&self, message: &str) {
        let _ = styled(&mut io::stdout(), self.stdout_color, Color::Green, message, "");
    }

    pub fn message(&self, message: &str) {
        println!("{}", message);
    }
}

impl Default for Pretty {
    fn default() -> Self {
        Self::new()
    }
}

fn styled(out: &mut impl Write, color: bool, fg: Color, bold: &str, rest: &str) -> io::Result<()> {
    if !color {
        writeln!(out, "{}{}", bold, rest)?;
        return out.flush();
    }

    execute!(
        out,
        SetForegroundColor(fg),
        SetAttribute(Attribute::Bold),
        Print(bold),
        SetAttribute(Attribute::Reset),
        ResetColor,
        Print(rest),
        Print("\n")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_output() {
        let mut out = Vec::new();
        styled(&mut out, false, Color::Red, "ConfigError: ", "No quill.toml file found.").unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ConfigError: No quill.toml file found.\n"
        );
    }

    #[test]
    fn test_colored_output_keeps_text() {
        let mut out = Vec::new();
        styled(&mut out, true, Color::Green, "done", "").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("done"));
        assert!(text.contains('\x1b'));
    }
}
