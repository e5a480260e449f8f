use framefit::model::{ChildNode, Frame, Point, SceneNode};

#[test]
fn resizes_a_scene_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let scene_path = dir.path().join("scene.json");

    let mut frame = Frame::new("card", 0.0, 0.0, 200.0, 200.0);
    frame.children.push(ChildNode::placed("label", 10.0, 10.0, 50.0, 50.0));
    framefit::host::write_scene(&scene_path, &[SceneNode::Frame(frame)]).unwrap();

    let output = test_bin::get_test_bin("framefit")
        .arg(&scene_path)
        .args(["--ephemeral", "--mode", "all", "--padding", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Done. Resized 1 of 1 frame."), "stderr: {stderr}");

    let updated: Vec<SceneNode> = serde_json::from_slice(&output.stdout).unwrap();
    let frame = updated[0].as_frame().unwrap();
    assert_eq!(frame.width(), 54.0);
    assert_eq!(frame.height(), 54.0);
    assert_eq!(frame.origin(), Point::new(8.0, 8.0));
}

#[test]
fn reports_a_missing_scene_file() {
    let output = test_bin::get_test_bin("framefit")
        .arg("/no/such/scene.json")
        .arg("--ephemeral")
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to read"), "stderr: {stderr}");
}
