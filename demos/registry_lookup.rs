use chrono::NaiveDate;
use civicgen::core::*;
use civicgen::registry::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicgen=debug".into()),
        )
        .init();

    // Registry-backed person with the default Skatteverket endpoint
    let options = PersonOptions::new(Country::Sweden).age(AgeConstraints::year(1970, 1990)?);
    let person = generate_person_with_registry(&options).await?;
    println!(
        "{} {} born {}: {}",
        person.first_name, person.last_name, person.birthday, person.civic_no
    );

    // Lower-level access with a short timeout
    let client = SkatteverketClient::new(
        RegistryConfig::default().with_timeout(std::time::Duration::from_secs(3)),
    )?;
    let birthday = NaiveDate::from_ymd_opt(1990, 5, 14).ok_or("bad date")?;
    let outcome = RegistryBackedGenerator::new(client)
        .with_timeout(std::time::Duration::from_secs(3))
        .swedish_number(birthday, Sex::Female)
        .await?;
    println!("{:?}: {} (born {})", outcome.format, outcome.number, outcome.birthday);

    Ok(())
}
