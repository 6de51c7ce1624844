use std::process::Command;

fn monster_maze() -> Command {
    Command::new(env!("CARGO_BIN_EXE_monster-maze"))
}

#[test]
fn replay_prints_banner_and_one_frame_per_key() {
    let output = monster_maze()
        .args(["--replay", "LEFT,LEFT,UP"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch monster-maze");

    assert!(output.status.success(), "replay should succeed: {output:?}");
    let stdout = String::from_utf8(output.stdout).expect("utf8 stdout");
    let lines: Vec<&str> = stdout.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Welcome to Monster Maze.");
    assert_eq!(lines[1], "back left3 right3 right2 left1 left0 right0");
    assert_eq!(lines[3], "back left1 right1 mid1 left0 right0");
    assert_eq!(lines[4], lines[3], "walking into the west wall changes nothing");
}

#[test]
fn replay_rejects_unknown_keys() {
    let output = monster_maze()
        .args(["--replay", "UP,JUMP"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch monster-maze");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("JUMP"), "stderr should name the key: {stderr}");
}

#[test]
fn replay_rejects_layouts_that_wall_in_the_start_cell() {
    let path = std::env::temp_dir().join(format!("monster-maze-walled-{}.txt", std::process::id()));
    std::fs::write(&path, "##########\n".repeat(10)).expect("write layout");

    let output = monster_maze()
        .arg("--layout")
        .arg(&path)
        .args(["--replay", "UP"])
        .env("RUST_LOG", "off")
        .output()
        .expect("failed to launch monster-maze");
    let _ = std::fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot host the player"), "unexpected stderr: {stderr}");
}
