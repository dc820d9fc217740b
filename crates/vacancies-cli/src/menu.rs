//! Interactive query menu.
//!
//! The loop reads one choice per line, runs the matching query and prints the
//! result. It is generic over the input and output streams so it can be driven
//! from stdin/stdout or from in-memory buffers.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use anyhow::Context;
use thiserror::Error;

use vacancies_core::{CompanyVacancyCount, VacancyListing, VacancyQueries};

const MENU_TEXT: &str = "
Choose an action:
  1. List all vacancies
  2. Search vacancies by keyword
  3. List companies with vacancy counts
  4. Show average salary
  5. List vacancies above average salary
  6. Exit
";
const CHOICE_PROMPT: &str = "Enter a number (1-6): ";
const KEYWORD_PROMPT: &str = "Enter a keyword: ";

/// One entry of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    AllVacancies,
    SearchByKeyword,
    CompanyCounts,
    AverageSalary,
    AboveAverageSalary,
    Exit,
}

/// Input that does not name a menu entry.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid choice '{0}'. Enter a number from 1 to 6.")]
pub struct InvalidChoice(pub String);

impl FromStr for MenuChoice {
    type Err = InvalidChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::AllVacancies),
            "2" => Ok(MenuChoice::SearchByKeyword),
            "3" => Ok(MenuChoice::CompanyCounts),
            "4" => Ok(MenuChoice::AverageSalary),
            "5" => Ok(MenuChoice::AboveAverageSalary),
            "6" => Ok(MenuChoice::Exit),
            other => Err(InvalidChoice(other.to_string())),
        }
    }
}

pub fn format_salary(salary: Option<i32>) -> String {
    match salary {
        Some(amount) => amount.to_string(),
        None => "not specified".to_string(),
    }
}

/// Formats a listing as `company | vacancy | salary | link`.
pub fn format_listing(listing: &VacancyListing) -> String {
    format!(
        "{} | {} | {} | {}",
        listing.company_name,
        listing.vacancy_name,
        format_salary(listing.salary),
        listing.link
    )
}

pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(value) => format!("Average salary: {:.2}", value),
        None => "Average salary: no salary data".to_string(),
    }
}

fn write_listings<W: Write>(output: &mut W, listings: &[VacancyListing]) -> io::Result<()> {
    if listings.is_empty() {
        return writeln!(output, "No vacancies found.");
    }

    for (i, listing) in listings.iter().enumerate() {
        writeln!(output, "{}. {}", i + 1, format_listing(listing))?;
    }
    writeln!(output, "Total: {}", listings.len())
}

fn write_company_counts<W: Write>(
    output: &mut W,
    counts: &[CompanyVacancyCount],
) -> io::Result<()> {
    if counts.is_empty() {
        return writeln!(output, "No companies found.");
    }

    for count in counts {
        writeln!(output, "{}: {}", count.name, count.vacancies_count)?;
    }
    Ok(())
}

/// Reads one line without its terminator, or `None` at end of input.
fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}

fn prompt<W: Write>(output: &mut W, text: &str) -> io::Result<()> {
    write!(output, "{}", text)?;
    output.flush()
}

/// Runs the menu until the user picks exit or the input ends.
///
/// Invalid choices print an error and show the menu again. A failing query
/// ends the loop with that error.
pub async fn run_menu<Q, R, W>(queries: &Q, input: &mut R, output: &mut W) -> anyhow::Result<()>
where
    Q: VacancyQueries,
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", MENU_TEXT)?;
        prompt(output, CHOICE_PROMPT)?;

        let Some(line) = read_line(input)? else {
            break;
        };

        let choice = match line.trim().parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(e) => {
                writeln!(output, "{}", e)?;
                continue;
            }
        };

        match choice {
            MenuChoice::AllVacancies => {
                let listings = queries
                    .all_vacancies()
                    .await
                    .context("Failed to list vacancies")?;
                write_listings(output, &listings)?;
            }
            MenuChoice::SearchByKeyword => {
                prompt(output, KEYWORD_PROMPT)?;
                // Surrounding spaces are part of the keyword.
                let Some(keyword) = read_line(input)? else {
                    break;
                };
                let listings = queries
                    .vacancies_matching_keyword(&keyword)
                    .await
                    .context("Failed to search vacancies")?;
                write_listings(output, &listings)?;
            }
            MenuChoice::CompanyCounts => {
                let counts = queries
                    .companies_with_vacancy_counts()
                    .await
                    .context("Failed to count vacancies per company")?;
                write_company_counts(output, &counts)?;
            }
            MenuChoice::AverageSalary => {
                let average = queries
                    .average_salary()
                    .await
                    .context("Failed to compute average salary")?;
                writeln!(output, "{}", format_average(average))?;
            }
            MenuChoice::AboveAverageSalary => {
                let listings = queries
                    .vacancies_above_average_salary()
                    .await
                    .context("Failed to list vacancies above average salary")?;
                write_listings(output, &listings)?;
            }
            MenuChoice::Exit => {
                writeln!(output, "Goodbye!")?;
                break;
            }
        }
    }

    Ok(())
}
