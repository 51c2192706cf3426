use turnkit_camtools::{
    DemoProfile, ProfileBitmap, TurningError, TurningMachine, TurningParameters,
};

fn coarse_params() -> TurningParameters {
    TurningParameters {
        angular_step_deg: 10.0,
        ..Default::default()
    }
}

#[test]
fn test_disk_has_constant_cross_section() {
    let machine = TurningMachine::new(DemoProfile::Disk.bitmap(), coarse_params()).unwrap();
    let table = machine.cross_section();
    assert_eq!(table.len(), 36);
    for sample in table.samples() {
        assert!(
            (sample.r - 0.5).abs() < 0.01,
            "radius {} at {} rad",
            sample.r,
            sample.theta
        );
    }
}

#[test]
fn test_disk_program_first_pass() {
    let machine = TurningMachine::new(DemoProfile::Disk.bitmap(), coarse_params()).unwrap();
    let program = machine.post_sbp().unwrap();
    assert!(program.is_complete());

    let lines = program.lines();
    assert_eq!(lines.len(), 5 + 4 * 629 + 2);
    assert!(lines[5].starts_with("MB,0.0000"));
    assert!(lines[6].starts_with("MZ,0.5000"));
    assert_eq!(lines[7], "M5,,6.00000,,,0.00000");

    let text = program.to_sbp_string();
    assert!(text.starts_with("MS,4,,,270 ' Set Speeds\nSO,1,1 ' Spindle on\n"));
    assert!(text.ends_with("M5,,0.00000,,,0.00000"));
}

#[test]
fn test_program_file_written() {
    let machine = TurningMachine::new(DemoProfile::Disk.bitmap(), coarse_params()).unwrap();
    let program = machine.post_sbp().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("turning-machine.sbp");
    program.write_to_file(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), program.len());
}

#[test]
fn test_empty_profile_is_an_error() {
    let err = TurningMachine::new(ProfileBitmap::empty(400, 400, 128), coarse_params())
        .unwrap_err();
    assert!(matches!(err, TurningError::EmptyProfile { .. }));
}

#[test]
fn test_profile_from_png() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("disk.png");
    DemoProfile::Disk.bitmap().image().save(&path).unwrap();

    let profile = ProfileBitmap::from_file(&path, 128).unwrap();
    assert!((profile.source_diameter_px().unwrap() - 110.0).abs() < 1e-9);
}

#[test]
fn test_render_keeps_disk() {
    let machine = TurningMachine::new(DemoProfile::Disk.bitmap(), coarse_params()).unwrap();
    let as_cut = machine.render().unwrap();
    let (cx, cy) = as_cut.center();

    assert!(as_cut.is_opaque(cx as i64, cy as i64));
    assert!(as_cut.is_opaque(cx as i64, cy as i64 - 45));
    assert!(!as_cut.is_opaque(cx as i64, cy as i64 - 65));
    assert!(!as_cut.is_opaque(cx as i64, 5));
}
