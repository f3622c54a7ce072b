use chrono::NaiveDate;
use civicgen::core::*;

fn main() -> Result<(), GenerationError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // One random person per country
    for country in Country::ALL {
        let person = generate_person(&PersonOptions::new(country))?;
        println!(
            "{:<7} {} {} ({:?}, born {}) {}",
            country.code(),
            person.first_name,
            person.last_name,
            person.sex,
            person.birthday,
            person.civic_no,
        );
    }

    // Reproducible output with explicit constraints
    let options = PersonOptions::new(Country::Norway)
        .language("de")
        .sex(Sex::Female)
        .age(AgeConstraints::year(1985, 1990)?)
        .reference_date(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    let person = generate_person_seeded(&options, 42)?;
    println!("\nSeeded Norwegian person:");
    println!("{}", serde_json::to_string_pretty(&person).expect("person serializes"));

    Ok(())
}
