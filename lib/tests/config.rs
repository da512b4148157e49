use lifeboard_lib::{Config, ConfigChange, Error as BoardError, RuleTable};
use std::{error::Error, time::Duration};

#[test]
fn default() -> Result<(), Box<dyn Error>> {
    let config = Config::default();
    assert_eq!(config.scale, 16);
    assert_eq!((config.width, config.height), (50, 50));
    assert_eq!(config.fps, 30);
    assert_eq!(config.rule_string, "B3/S23");
    assert_eq!(config.seed, None);
    assert_eq!(config.delay(), Duration::from_millis(33));
    assert_eq!(config.rules()?, RuleTable::default());
    Ok(())
}

#[test]
fn dimensions() {
    let mut config = Config::default();
    assert_eq!(config.update_width(50), ConfigChange::Unchanged);
    assert_eq!(config.update_width(80), ConfigChange::Rebuild);
    assert_eq!(config.width, 80);
    assert_eq!(config.update_height(-4), ConfigChange::Rebuild);
    assert_eq!(config.height, 1);
    assert_eq!(config.update_height(1), ConfigChange::Unchanged);
    assert_eq!(config.update_height(0), ConfigChange::Rebuild);
    assert_eq!(config.height, 1);
    assert_eq!(config.update_scale(0), ConfigChange::Rebuild);
    assert_eq!(config.scale, 1);
}

#[test]
fn clamp_values() {
    let mut config = Config::default().set_scale(-5).set_fps(5000);
    config.clamp_values();
    assert_eq!((config.scale, config.fps), (1, 1000));

    let mut config = Config::default().set_fps(0);
    config.clamp_values();
    assert_eq!(config, Config::default().set_fps(1));
}

#[test]
fn fps() {
    let mut config = Config::default();
    assert_eq!(config.update_fps(30), ConfigChange::Unchanged);
    assert_eq!(config.update_fps(5000), ConfigChange::Retime);
    assert_eq!(config.fps, 1000);
    assert_eq!(config.delay(), Duration::from_millis(1));
    assert_eq!(config.update_fps(-2), ConfigChange::Retime);
    assert_eq!(config.fps, 1);
    assert_eq!(config.delay(), Duration::from_millis(1000));
}

#[test]
fn rule_string() -> Result<(), Box<dyn Error>> {
    let mut config = Config::default();
    let rules = config.update_rule_string("B36/S23")?;
    assert_eq!(rules.to_string(), "B36/S23");
    assert_eq!(config.rule_string, "B36/S23");

    assert!(matches!(
        config.update_rule_string("nonsense"),
        Err(BoardError::ParseRuleError(_))
    ));
    assert_eq!(config.rule_string, "B36/S23");
    Ok(())
}

#[test]
fn board() -> Result<(), Box<dyn Error>> {
    let config = Config::new(12, 7).set_seed(99);
    let rules = config.rules()?;
    let a = config.board(&rules)?;
    let b = config.board(&rules)?;
    assert_eq!((a.width(), a.height()), (12, 7));
    assert_eq!(a.to_string(), b.to_string());

    let config = Config::new(0, 7);
    assert!(matches!(
        config.board(&rules),
        Err(BoardError::InvalidDimension(0, 7))
    ));
    Ok(())
}

#[test]
#[cfg(feature = "serde")]
fn ser() -> Result<(), Box<dyn Error>> {
    let config = Config::new(30, 20)
        .set_scale(4)
        .set_fps(12)
        .set_rule_string("B36/S23")
        .set_seed(7);
    let json = serde_json::to_string(&config)?;
    let new_config: Config = serde_json::from_str(&json)?;
    assert_eq!(new_config, config);

    let partial: Config = serde_json::from_str(r#"{ "width": 8, "fps": 60 }"#)?;
    assert_eq!(partial, Config::new(8, 50).set_fps(60));
    Ok(())
}
