//! The `quizkit init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    std::fs::create_dir_all("data")?;
    std::fs::create_dir_all("results")?;
    let example_path = Path::new("data/example_intro.json");
    if example_path.exists() {
        println!("data/example_intro.json already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_QUIZ)?;
        println!("Created data/example_intro.json");
    }

    println!("\nNext steps:");
    println!("  1. Add quiz files to data/ (one <quiz_id>.json per quiz)");
    println!("  2. Run: quizkit validate");
    println!("  3. Run: quizkit list");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

data_dir = "./data"
results_dir = "./results"
max_reported_errors = 20
"#;

const EXAMPLE_QUIZ: &str = r#"{
  "id": "example_intro",
  "lecture": "example1",
  "topic": "Getting started",
  "created": "2024-01-01T00:00:00",
  "questions": [
    {
      "id": "q1",
      "type": "multiple_choice",
      "question": "How many degrees of freedom does a 2D homography have?",
      "options": ["4", "6", "8", "9"],
      "correct": 2,
      "topic": "degrees_of_freedom",
      "slide_ref": "Slide 3"
    },
    {
      "id": "q2",
      "type": "true_false",
      "question": "A homography maps lines to lines.",
      "correct": true,
      "topic": "properties"
    },
    {
      "id": "q3",
      "type": "short_answer",
      "question": "How is the homography recovered from the DLT system?",
      "expected_keywords": ["svd", "null space"],
      "topic": "dlt"
    },
    {
      "id": "q4",
      "type": "multiple_choice",
      "question": "How many point correspondences does the DLT need at minimum?",
      "options": ["2", "3", "4", "8"],
      "correct": 2,
      "topic": "dlt"
    },
    {
      "id": "q5",
      "type": "true_false",
      "question": "Normalizing the points before DLT is unnecessary.",
      "correct": false,
      "topic": "normalization"
    }
  ]
}
"#;
