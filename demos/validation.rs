use civicgen::civic::{self, sweden};
use civicgen::core::Country;

fn main() {
    let samples = [
        (Country::Norway, "14059000102"),
        (Country::Norway, "54059000015"),
        (Country::Norway, "14059000103"),
        (Country::Sweden, "198112189876"),
        (Country::Sweden, "199005741245"),
        (Country::Sweden, "19900514TF20"),
        (Country::Sweden, "198112189877"),
        (Country::Spain, "12345678Z"),
        (Country::Spain, "X1234567L"),
        (Country::Spain, "12345678M"),
    ];

    for (country, number) in samples {
        match civic::validate_civic_number(country, number) {
            Ok(format) => println!("{number:<14} valid   {format:?}"),
            Err(e) => println!("{number:<14} INVALID {}", e.reason),
        }
    }

    // Swedish numbers carry the birth date and sex
    for number in ["199005741245", "19900514TF20"] {
        println!(
            "{number}: born {:?}, {:?}",
            sweden::decode_birth_date(number),
            sweden::sex_of(number),
        );
    }
}
