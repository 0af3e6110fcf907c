use simple_shooter::entities::*;

#[test]
fn player_defaults() {
    let p = Player::default();
    assert_eq!((p.entity.width, p.entity.height), (100.0, 50.0));
    assert_eq!(p.entity.color, Rgba::WHITE);
    assert_eq!((p.entity.x, p.entity.y), (0.0, 0.0));
    assert_eq!(p.entity.sprite, None);
    assert_eq!(p.health, 0);
    assert_eq!(p.reload, 0);
}

#[test]
fn bullet_defaults() {
    let b = Bullet::default();
    assert_eq!((b.entity.width, b.entity.height), (10.0, 10.0));
    assert_eq!(b.entity.color, Rgba::RED);
    assert_eq!(b.entity.sprite, None);
    assert_eq!((b.entity.dx, b.entity.dy), (0.0, 0.0));
}

#[test]
fn spawn_centres_player_vertically() {
    let p = Player::spawn(600, None);
    assert_eq!((p.entity.width, p.entity.height), (128.0, 128.0));
    assert_eq!((p.entity.x, p.entity.y), (100.0, 236.0));

    let p = Player::spawn(129, Some(SpriteId(7)));
    assert_eq!(p.entity.y, 0.5);
    assert_eq!(p.entity.sprite, Some(SpriteId(7)));
}

#[test]
fn spawn_in_tiny_window_goes_negative() {
    let p = Player::spawn(100, None);
    assert_eq!(p.entity.y, -14.0);
}

#[test]
fn bullet_fired_from_right_centre_of_shooter() {
    let mut shooter = Entity::new(128.0, 128.0, Rgba::WHITE);
    shooter.x = 100.0;
    shooter.y = 275.0;
    let b = Bullet::fired_from(&shooter);
    assert_eq!((b.entity.x, b.entity.y), (218.0, 334.0));
    assert_eq!((b.entity.dx, b.entity.dy), (10.0, 0.0));
}

#[test]
fn entity_edges() {
    let mut e = Entity::new(30.0, 20.0, Rgba::BLACK);
    e.x = 5.0;
    e.y = -5.0;
    assert_eq!(e.right(), 35.0);
    assert_eq!(e.bottom(), 15.0);
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player::spawn(600, None),
        bullets: vec![Bullet::default()],
        width: 800,
        height: 600,
        frame: 12,
    };
    let mut copy = original.clone();
    copy.player.entity.x += 50.0;
    copy.bullets.clear();
    copy.frame += 1;

    assert_eq!(original.player.entity.x, 100.0);
    assert_eq!(original.bullets.len(), 1);
    assert_eq!(original.frame, 12);
    assert_ne!(original, copy);
}
