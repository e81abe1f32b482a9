use std::error::Error;
use std::io::Write;

/// Renders a picked recipe. All formatting lives on this side of the boundary.
pub trait Presenter {
    fn present(
        &mut self,
        name: &str,
        instructions: &str,
        ingredients: &[String],
    ) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// Writes a plain-text recipe card
pub struct TextPresenter<W: Write> {
    out: W,
    max_instruction_chars: Option<usize>,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        TextPresenter {
            out,
            max_instruction_chars: None,
        }
    }

    /// Cut instructions longer than `max` characters and append an ellipsis
    pub fn with_max_instruction_chars(mut self, max: Option<usize>) -> Self {
        self.max_instruction_chars = max;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(
        &mut self,
        name: &str,
        instructions: &str,
        ingredients: &[String],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        writeln!(self.out, "# {}", name)?;

        if !ingredients.is_empty() {
            writeln!(self.out)?;
            for ingredient in ingredients {
                writeln!(self.out, "- {}", ingredient)?;
            }
        }

        let instructions = instructions.trim();
        if !instructions.is_empty() {
            writeln!(self.out)?;
            writeln!(
                self.out,
                "{}",
                truncate(instructions, self.max_instruction_chars)
            )?;
        }
        writeln!(self.out)?;
        Ok(())
    }
}

fn truncate(text: &str, max: Option<usize>) -> String {
    match max {
        Some(max) if text.chars().count() > max => {
            let cut: String = text.chars().take(max).collect();
            format!("{}…", cut.trim_end())
        }
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(presenter: TextPresenter<Vec<u8>>, ingredients: &[String], text: &str) -> String {
        let mut presenter = presenter;
        presenter.present("Omelette", text, ingredients).unwrap();
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn test_renders_card() {
        let ingredients = vec!["3 Eggs".to_string(), "Butter".to_string()];
        let output = render(TextPresenter::new(Vec::new()), &ingredients, "Whisk and fry.");

        assert_eq!(output, "# Omelette\n\n- 3 Eggs\n- Butter\n\nWhisk and fry.\n\n");
    }

    #[test]
    fn test_skips_empty_sections() {
        let output = render(TextPresenter::new(Vec::new()), &[], "  ");
        assert_eq!(output, "# Omelette\n\n");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let presenter = TextPresenter::new(Vec::new()).with_max_instruction_chars(Some(5));
        let output = render(presenter, &[], "Fouettez les œufs");
        assert!(output.contains("Fouet…"));
        assert!(!output.contains("œufs"));
    }

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate("Fry.", Some(10)), "Fry.");
        assert_eq!(truncate("Fry.", None), "Fry.");
    }
}
