use fruit_catcher::entities::*;

#[test]
fn entity_clone_and_eq() {
    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(FruitColor::Red, FruitColor::Red);
    assert_ne!(FruitColor::Red, FruitColor::Orange);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::Winning);
    assert_eq!(SoundCue::Happy, SoundCue::Happy);
    assert_ne!(SoundCue::Sad, SoundCue::Winning);
    assert_eq!(FruitPhase::Falling, FruitPhase::Falling);
    assert_ne!(FruitPhase::Falling, FruitPhase::Captured { delay: 0 });

    // The held-fruit countdown is part of the phase's identity
    assert_eq!(
        FruitPhase::Captured { delay: 3 },
        FruitPhase::Captured { delay: 3 }
    );
    assert_ne!(
        FruitPhase::Captured { delay: 3 },
        FruitPhase::Captured { delay: 2 }
    );

    // Clone must produce an equal value
    let color = FruitColor::Purple;
    assert_eq!(color.clone(), FruitColor::Purple);
}

#[test]
fn fruit_colors_palette_has_six_distinct_entries() {
    assert_eq!(FRUIT_COLORS.len(), 6);
    for (i, a) in FRUIT_COLORS.iter().enumerate() {
        for b in &FRUIT_COLORS[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        basket: Basket { x: 430.0, y: 510.0, width: 100.0, height: 20.0 },
        fruits: vec![Fruit {
            x: 300.0,
            y: 100.0,
            radius: 40.0,
            color: FruitColor::Green,
            phase: FruitPhase::Falling,
        }],
        explosions: Vec::new(),
        score: 0,
        winning_score: 100,
        auto_mode: false,
        status: GameStatus::Playing,
        frame: 0,
        width: 960.0,
        height: 540.0,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.basket.x = 0.0;
    cloned.fruits[0].y = 999.0;
    cloned.score = 50;
    cloned.explosions.push(Explosion {
        x: 1.0,
        y: 1.0,
        color: FruitColor::Blue,
        radius: 40.0,
        max_radius: 120.0,
        growth: 4.0,
    });

    assert_eq!(original.basket.x, 430.0);
    assert_eq!(original.fruits[0].y, 100.0);
    assert_eq!(original.score, 0);
    assert!(original.explosions.is_empty());
}
