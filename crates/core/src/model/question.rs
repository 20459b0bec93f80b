use std::fmt;

/// A single yes/no quiz question.
///
/// Built by a question source and handed to `QuizSession`, which drops it once
/// the answer has been scored and the round advances.
#[derive(Clone, PartialEq, Eq)]
pub struct Question {
    image: Vec<u8>,
    text: String,
    correct_answer: bool,
}

impl Question {
    #[must_use]
    pub fn new(image: Vec<u8>, text: impl Into<String>, correct_answer: bool) -> Self {
        Self {
            image,
            text: text.into(),
            correct_answer,
        }
    }

    /// Raw poster bytes, undecoded. Empty for text-only questions.
    #[must_use]
    pub fn image(&self) -> &[u8] {
        &self.image
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn correct_answer(&self) -> bool {
        self.correct_answer
    }

    /// Returns true when `given` matches the expected answer.
    #[must_use]
    pub fn is_correct(&self, given: bool) -> bool {
        given == self.correct_answer
    }
}

// Poster bytes would flood logs.
impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("image_len", &self.image.len())
            .field("text", &self.text)
            .field("correct_answer", &self.correct_answer)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scoring_compares_against_expected_answer() {
        let yes = Question::new(Vec::new(), "Rated higher than 7?", true);
        assert!(yes.is_correct(true));
        assert!(!yes.is_correct(false));

        let no = Question::new(vec![1, 2, 3], "Rated higher than 7?", false);
        assert!(no.is_correct(false));
        assert_eq!(no.image(), &[1, 2, 3]);
    }

    #[test]
    fn debug_output_omits_image_bytes() {
        let q = Question::new(vec![0xFF; 4096], "Q", true);
        let rendered = format!("{q:?}");
        assert!(rendered.contains("image_len: 4096"));
        assert!(rendered.len() < 200);
    }
}
