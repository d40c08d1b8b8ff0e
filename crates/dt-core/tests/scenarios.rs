//! End-to-end scenarios through the public controller API.

use dt_core::{
    AchievementCode, AchievementKind, Controller, FixedDice, MemoryBackend, ThemeId, TodoConfig,
};

fn controller(faces: &[u32]) -> Controller<FixedDice, MemoryBackend> {
    let config = TodoConfig::default().with_theme(ThemeId::new(1).unwrap());
    Controller::new(
        config,
        FixedDice::new(faces.iter().copied()).unwrap(),
        MemoryBackend::new(),
    )
}

fn complete_all(c: &mut Controller<FixedDice, MemoryBackend>) {
    let ids: Vec<_> = c.tasks().iter().filter(|t| !t.done).map(|t| t.id).collect();
    for id in ids {
        c.toggle_task(id);
    }
}

fn count(c: &Controller<FixedDice, MemoryBackend>, code: AchievementCode) -> usize {
    c.achievements().iter().filter(|a| a.code == code).count()
}

#[test]
fn scenario_a_roll_with_empty_list() {
    let mut c = controller(&[3]);
    let t = c.roll_target();
    assert_eq!(c.roll_context().target(), Some(3));
    assert_eq!(c.roll_context().second_roll().map(|f| f.value()), Some(3));
    assert_eq!(c.message(), "Rolled 3: try to complete 3 tasks today!");
    assert!(t.new_achievements.is_empty());
    assert!(c.achievements().is_empty());
}

#[test]
fn scenario_b_hit_target_and_clear_all() {
    let mut c = controller(&[3]);
    c.roll_target();
    c.add_task("one");
    c.add_task("two");
    c.add_task("three");
    complete_all(&mut c);

    let roll_id = c.roll_context().roll_id();
    assert_eq!(count(&c, AchievementCode::HitTarget), 1);
    assert_eq!(count(&c, AchievementCode::AllDone), 1);
    assert!(c.achievements().iter().all(|a| a.roll_id == roll_id));
    assert_eq!(c.message(), "Everything cleared!");
}

#[test]
fn scenario_c_not_your_day_once() {
    let mut c = controller(&[1]);
    c.roll_target();
    assert_eq!(c.roll_context().target(), Some(1));
    assert_eq!(c.roll_context().second_roll().map(|f| f.value()), Some(1));

    c.add_task("first");
    c.add_task("second");
    let first = c.tasks()[1].id;
    let second = c.tasks()[0].id;

    c.toggle_task(first);
    assert_eq!(count(&c, AchievementCode::NotYourDay), 1);
    let badge = c
        .achievements()
        .iter()
        .find(|a| a.code == AchievementCode::NotYourDay)
        .unwrap();
    assert_eq!(badge.kind, AchievementKind::Failure);

    let t = c.toggle_task(second);
    assert!(
        t.new_achievements
            .iter()
            .all(|a| a.code != AchievementCode::NotYourDay)
    );
    assert_eq!(count(&c, AchievementCode::NotYourDay), 1);
}

#[test]
fn scenario_d_rolls_are_independent() {
    let mut c = controller(&[2, 4]);
    c.add_task("a");
    c.add_task("b");
    c.roll_target();
    complete_all(&mut c);
    let first_roll = c.roll_context().roll_id();
    let earned_first = c.achievements().len();
    assert_eq!(count(&c, AchievementCode::HitTarget), 1);

    let t = c.roll_target();
    assert_eq!(c.roll_context().roll_id(), first_roll + 1);
    assert_eq!(c.roll_context().target(), Some(4));

    // Both tasks done still clears the list under the new roll, but 2 < 4.
    let codes: Vec<_> = t.new_achievements.iter().map(|a| a.code).collect();
    assert_eq!(codes, vec![AchievementCode::AllDone]);
    assert_eq!(
        c.achievements()
            .iter()
            .filter(|a| a.roll_id == first_roll)
            .count(),
        earned_first
    );
    assert!(
        c.achievements()
            .iter()
            .filter(|a| a.roll_id == first_roll + 1)
            .all(|a| a.code != AchievementCode::HitTarget)
    );
}

#[test]
fn roll_id_increments_every_target_roll() {
    let mut c = controller(&[1, 6, 3]);
    for expected in 1..=6 {
        c.roll_target();
        assert_eq!(c.roll_context().roll_id(), expected);
        let face = c.roll_context().second_roll().unwrap().value();
        let target = c.roll_context().target().unwrap();
        if face == 1 {
            assert_eq!(target, 1);
        } else {
            assert_eq!(target, face);
        }
    }
}

#[test]
fn audio_never_plays_two_tracks() {
    let mut c = controller(&[2, 3, 3, 5, 1, 4]);
    c.notify_interaction();
    for _ in 0..6 {
        c.roll_theme();
        assert!(c.audio().backend().playing().len() <= 1);
    }
    c.toggle_sound();
    assert!(c.audio().backend().playing().is_empty());
}

#[test]
fn same_theme_twice_issues_one_start() {
    let mut c = controller(&[3, 3]);
    c.notify_interaction();
    c.roll_theme();
    c.roll_theme();
    assert_eq!(c.audio().backend().play_count(), 1);
}
