//! The `quizkit list` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use quizkit_core::grouping::{group_quizzes, CourseIndex};

use crate::config::QuizkitConfig;

pub fn execute(config: &QuizkitConfig, format: String) -> Result<()> {
    let store = config.store();
    let quizzes = store.list_quizzes()?;
    let completed = store.completed_quizzes()?;
    let courses = group_quizzes(&quizzes, &completed);

    match format.as_str() {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&courses)?);
        }
        _ => {
            if courses.is_empty() {
                println!("No quizzes found in {}", store.data_dir().display());
            } else {
                print_table(&courses);
            }
        }
    }

    Ok(())
}

fn print_table(courses: &CourseIndex) {
    for (code, course) in courses {
        println!(
            "{code} ({}/{} completed)",
            course.completed_count, course.total_count
        );

        let mut table = Table::new();
        table.set_header(vec!["Lecture", "Quiz", "Topic", "Questions", "Created", "Done"]);

        for lecture in &course.lectures {
            for quiz in &lecture.quizzes {
                table.add_row(vec![
                    Cell::new(format!(
                        "{} ({}/{})",
                        lecture.name, lecture.completed_count, lecture.total_count
                    )),
                    Cell::new(&quiz.summary.id),
                    Cell::new(&quiz.summary.topic),
                    Cell::new(quiz.summary.num_questions),
                    Cell::new(&quiz.summary.created),
                    Cell::new(if quiz.completed { "yes" } else { "" }),
                ]);
            }
        }

        println!("{table}\n");
    }
}
