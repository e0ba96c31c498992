/// Property-based tests using proptest
/// Tests invariants that should hold for arbitrary page text and identities
use dca_license_verify::extract::{extract_expiration, extract_status, verify_collected_text};
use dca_license_verify::html_text::{collect_container_text, parse_page, ACTIONS_LIST};
use dca_license_verify::models::{License, LicenseDesc};
use proptest::prelude::*;

fn license(first: &str, last: &str, number: i64, name: &str) -> License {
    License {
        number,
        first_name: first.to_string(),
        last_name: last.to_string(),
        license_desc: LicenseDesc {
            board_code: 0,
            license_code: 224,
            name: name.to_string(),
        },
        ..Default::default()
    }
}

// Property: parsing and collecting never panic
proptest! {
    #[test]
    fn collector_never_panics(html in "\\PC*") {
        let _ = collect_container_text(&parse_page(&html), &ACTIONS_LIST);
    }

    #[test]
    fn collected_text_is_the_list_text(items in prop::collection::vec("[a-zA-Z0-9 ,:]{0,20}", 0..6)) {
        let html = format!(
            "<div><ul class=\"actions\">{}</ul></div>",
            items.iter().map(|i| format!("<li>{}</li>", i)).collect::<String>()
        );
        let collected = collect_container_text(&parse_page(&html), &ACTIONS_LIST);
        prop_assert_eq!(collected, Some(items.concat()));
    }
}

// Property: extraction never panics and respects the verify invariant
proptest! {
    #[test]
    fn extractors_never_panic(text in "\\PC*") {
        let _ = extract_status(&text);
        let _ = extract_expiration(&text);
    }

    #[test]
    fn verify_implies_status_and_expiration(
        text in "\\PC*",
        first in "[A-Za-z]{1,10}",
        last in "[A-Za-z]{1,10}",
        number in 1i64..10_000_000,
    ) {
        let mut lic = license(&first, &last, number, "Registered Nurse");
        let result = verify_collected_text(&text, &mut lic);
        prop_assert_eq!(result.is_ok(), lic.verify);
        if lic.verify {
            prop_assert!(!lic.status.is_empty());
            prop_assert_eq!(lic.status.trim(), lic.status.as_str());
            prop_assert!(!lic.expiration.is_empty());
        }
    }

    #[test]
    fn generated_result_pages_verify(
        first in "[A-Za-z][A-Za-z' .-]{0,12}",
        last in "[A-Za-z][A-Za-z' .()-]{0,12}",
        number in 1i64..10_000_000,
        type_name in "[A-Za-z][A-Za-z ()+.*]{0,20}",
        status in "[A-Z][A-Z ]{0,12}[A-Z]",
        day in 1u32..=28,
        year in 1990u32..=2099,
    ) {
        let lic = license(&first, &last, number, &type_name);
        let text = format!(
            "\n{}\nLicense Number: {}\nLicense Type: {}\nLicense Status: {}\nExpiration Date: March {:02}, {}\n",
            lic.registry_name(), number, type_name, status, day, year
        );

        let mut verified = lic.clone();
        prop_assert!(verify_collected_text(&text, &mut verified).is_ok());
        prop_assert!(verified.verify);
        prop_assert_eq!(verified.status, status);
        prop_assert_eq!(verified.expiration, format!("March {:02}, {}", day, year));
    }
}
