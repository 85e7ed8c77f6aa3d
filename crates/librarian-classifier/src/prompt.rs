//! LLM prompt engineering for document classification

/// Builds prompts for the LLM to classify a document excerpt
pub struct PromptBuilder {
    text: String,
}

impl PromptBuilder {
    /// Create a new prompt builder for an excerpt
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the complete classification prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Decision policy and field rules
        prompt.push_str(CLASSIFICATION_INSTRUCTIONS);
        prompt.push_str("\n\n");

        // 2. Worked examples
        prompt.push_str(EXAMPLES);
        prompt.push_str("\n\n");

        // 3. The excerpt to classify
        prompt.push_str("Text excerpt from the first pages of the PDF:\n");
        prompt.push_str("--------------------------------------------------\n");
        prompt.push_str(&self.text);
        prompt.push_str("\n--------------------------------------------------\n\n");

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

const CLASSIFICATION_INSTRUCTIONS: &str = r#"You are a careful librarian filing academic and technical PDF documents.
From an excerpt of the first pages, produce four fields: docType, description, newFileName, pathToFile.

docType - exactly one of these lowercase values:
- textbook: a book written to teach a subject; look for a preface stating its teaching purpose, chapter structure, exercises, "this book".
- paper: scholarly research; look for an abstract, keywords, methodology, results, references, institutional affiliations, arXiv identifiers.
- lecture_notes: course material; slides, handouts, assignments, course codes such as "CS101 Lecture 5".
- article: informal or non-peer-reviewed writing such as blog posts, magazine pieces, essays, technical write-ups.
- other: only when none of the above fits (manuals, forms, datasets, standalone reports). Use it as a last resort.
A book-length research monograph is a paper unless it is structured for learning.

description - two or three sentences on what the document is and covers.
- Name the primary author(s) and the publication year when the excerpt states them ("et al." for long author lists).
- When the author or year is absent from the excerpt, say "author not specified" or "year not specified". Never invent them.

newFileName - snake_case, ASCII only, ending in ".pdf".
- Start with the year (YYYY) and the primary author's surname when both are discernible; leave out whatever is missing.
- Follow with a few words from the title or key topic.

pathToFile - derived from docType and nothing else: "./<docType>/", for example "./paper/" or "./lecture_notes/"."#;

const EXAMPLES: &str = r#"Examples:

Excerpt: "Deep Learning with Python ... François Chollet ... Manning Publications, 2018 ... Preface ... Chapter 1"
{"docType": "textbook", "description": "'Deep Learning with Python' by Francois Chollet (2018) is an introductory book teaching deep learning with Keras. It is published by Manning.", "newFileName": "2018_chollet_deep_learning_with_python.pdf", "pathToFile": "./textbook/"}

Excerpt: "Attention Is All You Need ... Ashish Vaswani, Noam Shazeer, ... 2017 ... Abstract: The dominant sequence transduction models ..."
{"docType": "paper", "description": "This paper by Ashish Vaswani et al. (2017) introduces the Transformer, an architecture based solely on attention. It reports results on machine translation benchmarks.", "newFileName": "2017_vaswani_attention_is_all_you_need.pdf", "pathToFile": "./paper/"}

Excerpt: "6.006 Introduction to Algorithms, Lecture 3: Sorting ... Problem set 2 is due Thursday"
{"docType": "lecture_notes", "description": "Lecture notes for MIT 6.006 covering sorting algorithms. Author not specified; year not specified.", "newFileName": "6006_lecture_3_sorting.pdf", "pathToFile": "./lecture_notes/"}"#;

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (a single JSON object, no additional text):
{
  "docType": "textbook | paper | lecture_notes | article | other",
  "description": "...",
  "newFileName": "yyyy_author_short_title.pdf",
  "pathToFile": "./<docType>/"
}

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;

/// JSON schema for the classification response, for providers with
/// schema-constrained output
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "docType": {
      "type": "string",
      "enum": ["textbook", "paper", "lecture_notes", "article", "other"]
    },
    "description": { "type": "string" },
    "newFileName": { "type": "string" },
    "pathToFile": { "type": "string" }
  },
  "required": ["docType", "description", "newFileName", "pathToFile"],
  "additionalProperties": false
}"#;
