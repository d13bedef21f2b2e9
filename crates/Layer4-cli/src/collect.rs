//! 대화형 설정 수집 (init / new)
//!
//! 필드마다 한 번씩 묻습니다. 선택지는 `TypeRegistry` 등록 순서,
//! 기본값은 첫 번째 등록 이름입니다. 빈 입력이나 EOF는 기본값을 뜻합니다.

use quill_core::Quill;
use quill_foundation::{Category, Error, QuillConfig, Result};
use std::io::{BufRead, Write};

/// 질문/선택 인터페이스
pub trait Prompter {
    /// 자유 입력 (빈 입력은 `default`)
    fn ask(&mut self, question: &str, default: &str) -> Result<String>;

    /// `choices` 중 하나 선택 (번호 또는 이름)
    fn choose(&mut self, question: &str, choices: &[String], default: &str) -> Result<String>;
}

// ============================================================================
// LinePrompter
// ============================================================================

/// 줄 단위 입출력 기반 Prompter
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn read_answer(&mut self) -> Result<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, question: &str, default: &str) -> Result<String> {
        write!(self.output, "{} [{}]: ", question, default)?;
        self.output.flush()?;

        let answer = self.read_answer()?;
        Ok(if answer.is_empty() {
            default.to_string()
        } else {
            answer
        })
    }

    fn choose(&mut self, question: &str, choices: &[String], default: &str) -> Result<String> {
        writeln!(self.output, "{}:", question)?;
        for (i, choice) in choices.iter().enumerate() {
            let marker = if choice == default { " (default)" } else { "" };
            writeln!(self.output, "  {}) {}{}", i + 1, choice, marker)?;
        }
        write!(self.output, "Choose [{}]: ", default)?;
        self.output.flush()?;

        let answer = self.read_answer()?;
        if answer.is_empty() {
            return Ok(default.to_string());
        }

        if let Ok(index) = answer.parse::<usize>() {
            if let Some(choice) = index.checked_sub(1).and_then(|i| choices.get(i)) {
                return Ok(choice.clone());
            }
        }

        choices
            .iter()
            .find(|c| **c == answer)
            .cloned()
            .ok_or_else(|| {
                Error::Validation(format!(
                    "'{}' is not a valid choice for {} (choose one of: {})",
                    answer,
                    question,
                    choices.join(", ")
                ))
            })
    }
}

// ============================================================================
// 설정 수집
// ============================================================================

fn question(category: Category) -> &'static str {
    match category {
        Category::Project => "Project type",
        Category::Bot => "Bot",
        Category::Llm => "LLM model",
        Category::Server => "Server",
    }
}

/// 프로젝트 이름과 네 가지 타입 이름을 물어 설정 생성
pub fn collect_config(
    quill: &Quill,
    prompter: &mut dyn Prompter,
    default_name: &str,
) -> Result<QuillConfig> {
    let name = prompter.ask("Project name", default_name)?;
    if name.trim().is_empty() {
        return Err(Error::Validation("Project name must not be empty".to_string()));
    }

    let types = quill.types();
    let mut chosen = Vec::with_capacity(Category::ALL.len());
    for category in Category::ALL {
        let choices = types.list_values(category);
        let default = types.default_value(category)?;
        chosen.push(prompter.choose(question(category), &choices, &default)?);
    }

    // Category::ALL 순서: project, bot, llm, server
    let config = QuillConfig::new(
        name,
        chosen[0].as_str(),
        chosen[1].as_str(),
        chosen[2].as_str(),
        chosen[3].as_str(),
    );
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_defaults_on_empty_input() {
        let quill = Quill::with_builtins().unwrap();
        let mut p = prompter("");
        let config = collect_config(&quill, &mut p, "my-site").unwrap();

        assert_eq!(config.project.name, "my-site");
        assert_eq!(config.project.project_type, "static-website");
        assert_eq!(config.bot.name, "baby-quill");
        assert_eq!(config.llm.model_name, "gpt-3.5-turbo");
        assert_eq!(config.server.name, "static-website-server");

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("1) static-website (default)"));
        assert!(shown.contains("2) noop"));
    }

    #[test]
    fn test_choose_by_number_and_name() {
        let quill = Quill::with_builtins().unwrap();
        let mut p = prompter("docs\n2\nsimple\necho\n2\n");
        let config = collect_config(&quill, &mut p, "ignored").unwrap();

        assert_eq!(config.project.name, "docs");
        assert_eq!(config.project.project_type, "noop");
        assert_eq!(config.bot.name, "simple");
        assert_eq!(config.llm.model_name, "echo");
        assert_eq!(config.server.name, "null");
    }

    #[test]
    fn test_invalid_choice() {
        let quill = Quill::with_builtins().unwrap();
        let mut p = prompter("docs\n9\n");
        let err = collect_config(&quill, &mut p, "docs").unwrap_err();
        assert_eq!(err.kind(), "ValidationError");
        assert!(err.to_string().contains("static-website, noop"));
    }

    #[test]
    fn test_empty_registry_is_error() {
        let quill = Quill::new();
        let mut p = prompter("");
        let err = collect_config(&quill, &mut p, "docs").unwrap_err();
        assert_eq!(err.kind(), "EmptyCategoryError");
    }
}
