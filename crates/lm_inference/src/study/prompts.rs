pub(crate) fn flashcards(notes: &str) -> String {
    format!(
        r#"Create flashcards from the following notes. Generate 5-8 flashcards in JSON format with the following structure:
{{
  "flashcards": [
    {{ "front": "Question or term", "back": "Answer or definition" }}
  ]
}}
Focus on key concepts, definitions, and important facts. Make questions clear and answers concise.

Notes: {}"#,
        notes
    )
}

pub(crate) fn quiz(text: &str) -> String {
    format!(
        r#"Create a quiz from the following text. Generate 4-6 multiple choice questions in JSON format with the following structure:
{{
  "quiz": [
    {{
      "question": "Question text here?",
      "options": ["Option A", "Option B", "Option C", "Option D"],
      "correct": 0,
      "explanation": "Why this answer is correct"
    }}
  ]
}}

Make questions challenging but fair, with plausible distractors for incorrect options.

Text: {}"#,
        text
    )
}
