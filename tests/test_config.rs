use invaders::config::{ConfigError, GameConfig};

#[test]
fn default_config_is_valid() {
    assert_eq!(GameConfig::default().validate(), Ok(()));
}

#[test]
fn default_combat_constants() {
    let config = GameConfig::default();
    assert_eq!(config.cooldown_ms, 250);
    assert_eq!(config.lives, 3);
    assert_eq!(config.kill_score, 10);
    assert_eq!(config.edge_margin, 5.0);
    assert_eq!(config.fire_floor, 0.002);
    assert!((config.fire_rate - 0.05 / 30.0).abs() < 1e-12);
}

#[test]
fn frame_dt_follows_fps() {
    let mut config = GameConfig::default();
    config.fps = 10;
    assert!((config.frame_dt() - 0.1).abs() < 1e-6);
}

#[test]
fn negative_dimensions_rejected() {
    let mut config = GameConfig::default();
    config.height = -600.0;
    assert_eq!(
        config.validate(),
        Err(ConfigError::BadDimensions {
            width: 800.0,
            height: -600.0
        })
    );
}

#[test]
fn zero_fps_rejected() {
    let mut config = GameConfig::default();
    config.fps = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroFps));
}

#[test]
fn zero_cooldown_rejected() {
    let mut config = GameConfig::default();
    config.cooldown_ms = 0;
    assert_eq!(config.validate(), Err(ConfigError::ZeroCooldown));
}

#[test]
fn empty_fleet_grid_rejected() {
    let mut config = GameConfig::default();
    config.fleet_rows = 0;
    assert_eq!(config.validate(), Err(ConfigError::EmptyFleet));

    let mut config = GameConfig::default();
    config.fleet_cols = 0;
    assert_eq!(config.validate(), Err(ConfigError::EmptyFleet));
}

#[test]
fn errors_explain_themselves() {
    let messages = [
        ConfigError::BadDimensions {
            width: 0.0,
            height: 10.0,
        }
        .to_string(),
        ConfigError::ZeroFps.to_string(),
        ConfigError::ZeroCooldown.to_string(),
        ConfigError::EmptyFleet.to_string(),
    ];
    for msg in &messages {
        assert!(!msg.is_empty());
    }
    assert!(messages[0].contains("dimensions"));
}
