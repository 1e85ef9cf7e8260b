use life_history::simulation::{ClassicRule, Fuzzy5Rule, FuzzyConway};
use life_history::{
    CellSimulation, ClassicSimulation, Error, Fuzzy5Simulation, MemFullBehavior, SimulationSettings,
};

fn glider(sim: &mut ClassicSimulation) {
    for (x, y) in [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
        sim.set_cell(x, y, 1.0).unwrap();
    }
}

fn snapshot(sim: &dyn CellSimulation) -> Vec<f64> {
    let (w, h) = (sim.width(), sim.height());
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .map(|(x, y)| sim.get_cell(x, y).unwrap())
        .collect()
}

#[test]
fn test_glider_travels_and_rewinds() {
    let mut sim = ClassicSimulation::new(ClassicRule::new(), SimulationSettings::with_shape(16, 8, 8)).unwrap();
    glider(&mut sim);
    let start = snapshot(&sim);

    assert!(sim.go_to_generation(4).unwrap());
    assert_eq!(sim.life_sum().unwrap(), 5.0);
    // after four generations a glider is its own shape moved one cell diagonally
    for (x, y) in [(2, 1), (3, 2), (1, 3), (2, 3), (3, 3)] {
        assert_eq!(sim.get_cell(x, y).unwrap(), 1.0, "cell ({x}, {y})");
    }

    assert!(sim.go_to_generation(0).unwrap());
    assert_eq!(snapshot(&sim), start);
    assert_eq!(sim.generations_computed(), 4);
}

#[test]
fn test_glider_wraps_around_torus() {
    let mut sim = ClassicSimulation::new(ClassicRule::new(), SimulationSettings::with_shape(40, 8, 8)).unwrap();
    glider(&mut sim);
    let start = snapshot(&sim);
    // one full lap: eight diagonal moves of four generations each
    assert!(sim.go_to_generation(32).unwrap());
    assert_eq!(snapshot(&sim), start);
}

#[test]
fn test_history_policies_from_toml() {
    let settings = SimulationSettings::from_toml_str(
        "history_capacity = 4\nwidth = 5\nheight = 5\nhistory_full_behavior = \"stop_silently\"\n",
    )
    .unwrap();
    let mut sim = ClassicSimulation::new(ClassicRule::new(), settings).unwrap();
    assert!(!sim.go_to_generation(10).unwrap());
    assert_eq!(sim.current_generation(), 3);
    assert_eq!(sim.oldest_generation(), 0);

    let mut throwing = sim.settings().clone();
    throwing.history_full_behavior = MemFullBehavior::ThrowOnFull;
    sim.apply_settings(throwing).unwrap();
    assert!(matches!(sim.advance(), Err(Error::ResourceExhausted(_))));

    assert!(sim.rewind_one());
    assert!(sim.advance().unwrap());
    assert_eq!(sim.current_generation(), 3);
}

#[test]
fn test_forgetting_history_moves_oldest_generation() {
    let mut sim =
        Fuzzy5Simulation::<FuzzyConway>::new(Fuzzy5Rule::default(), SimulationSettings::with_shape(5, 6, 6)).unwrap();
    sim.fill();
    assert!(sim.go_to_generation(12).unwrap());
    assert_eq!(sim.num_generations(), 5);
    assert_eq!(sim.oldest_generation(), 8);

    assert!(!sim.go_to_generation(7).unwrap());
    assert_eq!(sim.current_generation(), 12);

    sim.go_to_oldest();
    assert_eq!(sim.current_generation(), 8);
    assert_eq!(sim.num_generations(), 1);
    assert_eq!(sim.generations_computed(), 12);
}

#[test]
fn test_statistics_track_navigation() {
    let mut settings = SimulationSettings::with_shape(10, 8, 8);
    settings.track_life_stats = true;
    let mut sim = ClassicSimulation::new(ClassicRule::new(), settings).unwrap();
    glider(&mut sim);

    sim.go_to_generation(6).unwrap();
    let stats = sim.life_stats().unwrap();
    assert_eq!(stats.len(), 6);
    assert!(stats.iter().all(|sum| sum == 5.0));

    sim.go_to_generation(2).unwrap();
    assert_eq!(sim.life_stats().unwrap().len(), 2);
    sim.go_to_oldest();
    assert!(sim.life_stats().unwrap().is_empty());
}

#[test]
fn test_shrinking_grid_keeps_history() {
    let mut sim = ClassicSimulation::new(ClassicRule::new(), SimulationSettings::with_shape(10, 8, 8)).unwrap();
    glider(&mut sim);
    sim.go_to_generation(3).unwrap();
    let mut smaller = sim.settings().clone();
    smaller.width = 4;
    smaller.height = 4;
    smaller.history_capacity = 2;
    sim.apply_settings(smaller).unwrap();

    assert_eq!(sim.num_generations(), 2);
    assert_eq!(sim.current_generation(), 3);
    assert!(sim.rewind_one());
    assert!(!sim.rewind_one());
    assert!(sim.get_cell(4, 0).is_err());
}

#[test]
fn test_load_missing_settings_file() {
    let path = std::env::temp_dir().join("life-history-does-not-exist.toml");
    assert!(matches!(SimulationSettings::load(path), Err(Error::Io(_))));
}

#[test]
fn test_load_settings_file() {
    let path = std::env::temp_dir().join(format!("life-history-{}.toml", std::process::id()));
    std::fs::write(&path, "width = 7\nwrap = false\ntrack_life_stats = true\n").unwrap();
    let settings = SimulationSettings::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(settings.width, 7);
    assert!(!settings.wrap);
    assert!(settings.track_life_stats);
    assert_eq!(settings.history_capacity, 100);
}
