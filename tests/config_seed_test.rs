use anyhow::Result;
use chrono::NaiveDate;
use hotel_reservations::domain::FixedClock;
use hotel_reservations::utils::validation::Validate;
use hotel_reservations::{ClientId, HotelConfig, HotelError, RoomId};
use rust_decimal_macros::dec;
use std::path::Path;

fn clock() -> FixedClock {
    FixedClock::new(
        NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap(),
    )
}

#[test]
fn test_bundled_config_seeds_the_registry() -> Result<()> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("hotel-config.toml");
    let config = HotelConfig::from_file(&path)?;
    config.validate()?;

    let mut manager = config.build_manager(clock())?;
    assert_eq!(manager.rooms().len(), 3);
    assert_eq!(manager.available_rooms().len(), 3);
    assert_eq!(manager.find_room(RoomId(3)).unwrap().price, dec!(89.90));
    assert_eq!(
        manager.find_client(ClientId(1)).unwrap().national_id,
        "111.111.111-11"
    );

    manager.make_reservation(ClientId(1), RoomId(2))?;
    let reserved: Vec<&str> = manager
        .reserved_rooms()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(reserved, vec!["Double"]);
    Ok(())
}

#[test]
fn test_missing_config_file_is_an_io_error() {
    let err = HotelConfig::from_file("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, HotelError::IoError(_)));
}

#[test]
fn test_permissive_registry_accepts_duplicate_seeds() -> Result<()> {
    let config = HotelConfig::from_toml_str(
        r#"
[registry]
enforce_unique_ids = false

[[clients]]
id = 1
name = "Ana"
cpf = "111"
age = 30

[[clients]]
id = 1
name = "Ana Clara"
cpf = "112"
age = 19
"#,
    )?;
    let manager = config.build_manager(clock())?;
    assert_eq!(manager.clients().len(), 2);
    assert_eq!(manager.find_client(ClientId(1)).unwrap().name, "Ana");
    Ok(())
}

#[test]
fn test_blank_client_name_fails_validation() -> Result<()> {
    let config = HotelConfig::from_toml_str(
        r#"
[[clients]]
id = 4
name = "  "
national_id = "444"
age = 44
"#,
    )?;
    assert!(matches!(
        config.validate(),
        Err(HotelError::InvalidConfigValue { ref field, .. }) if field == "clients.name"
    ));
    Ok(())
}
