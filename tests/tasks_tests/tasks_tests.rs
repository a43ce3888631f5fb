//! Tests for background task control
//!
//! These tests verify:
//! - Spawning and stopping tasks by function name
//! - halt_all empties the table and counts halts

use avpdb::tasks::{BackgroundTask, NoTasks, TaskController, TaskList};

#[test]
fn test_spawn_and_stop() {
    let tasks = TaskList::new();

    tasks.spawn("blink", 500);
    tasks.spawn("beep", 1000);

    assert!(tasks.stop("blink"));
    assert!(!tasks.stop("blink"));
    assert_eq!(
        tasks.running(),
        vec![BackgroundTask {
            function: "beep".to_string(),
            interval_ms: 1000,
        }]
    );
}

#[test]
fn test_halt_all_clears_table() {
    let tasks = TaskList::new();

    tasks.spawn("a", 10);
    tasks.spawn("b", 20);
    tasks.halt_all();

    assert!(tasks.is_idle());
    assert_eq!(tasks.halt_count(), 1);

    // Halting an idle table still counts
    tasks.halt_all();
    assert_eq!(tasks.halt_count(), 2);
}

#[test]
fn test_no_tasks_controller() {
    let controller: &dyn TaskController = &NoTasks;
    controller.halt_all();
}
