use turnkit_camtools::{DemoProfile, TurningMachine, TurningParameters};

#[test]
fn test_every_demo_runs() {
    let params = TurningParameters {
        angular_step_deg: 30.0,
        ..Default::default()
    };
    for demo in DemoProfile::ALL {
        let machine = TurningMachine::new(demo.bitmap(), params.clone()).unwrap();
        assert_eq!(machine.cross_section().len(), 12, "{}", demo);
        let program = machine.post_sbp().unwrap();
        assert!(program.is_complete(), "{}", demo);
    }
}

#[test]
fn test_corkscrew_is_thin_across() {
    let params = TurningParameters {
        angular_step_deg: 90.0,
        ..Default::default()
    };
    let machine = TurningMachine::new(DemoProfile::Corkscrew.bitmap(), params).unwrap();
    let samples = machine.cross_section().samples();

    // Bar is 200px wide and 20px tall; scale comes from the 200px extent.
    assert!(samples[0].r < 0.1);
    assert!(samples[1].r > 0.4);
}
