#![no_main]

use civicgen::civic::{self, sweden};
use civicgen::core::Country;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic. Errors are fine, panics are bugs.
        for country in Country::ALL {
            if let Ok(format) = civic::validate_civic_number(country, s) {
                assert_eq!(format.country(), country);
            }
        }
        if let Some(date) = sweden::decode_birth_date(s) {
            assert!(sweden::validate(s).is_ok(), "decoded {date} from invalid {s:?}");
        }
        let _ = sweden::sex_of(s);
    }
});
