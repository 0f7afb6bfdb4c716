use space_shooter::entities::*;

#[test]
fn screen_modes_compare() {
    assert_eq!(Screen::Menu, Screen::Menu);
    assert_ne!(Screen::Playing, Screen::GameOver);
    assert_ne!(Screen::History, Screen::Menu);
    assert_eq!(Screen::GameOver.clone(), Screen::GameOver);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            x: 375,
            y: 550,
            projectiles: Vec::new(),
        },
        enemies: Vec::new(),
        score: 0,
        high_score: 0,
        spawn_timer: 0,
        screen: Screen::Playing,
        width: 800,
        height: 600,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99;
    cloned.score = 999;
    cloned.enemies.push(Enemy { x: 5, y: 5, speed: 2 });
    cloned.player.projectiles.push(Projectile { x: 1, y: 2, speed: 7 });

    assert_eq!(original.player.x, 375);
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert!(original.player.projectiles.is_empty());
}
