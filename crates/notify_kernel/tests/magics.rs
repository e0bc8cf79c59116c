use std::rc::Rc;

use notify_contract::{decode_record, NotificationKind, MIME_TYPE};
use notify_kernel::{
    CellOutcome, Delivery, KernelError, MemoryDisplaySink, MemoryMailTransport,
    NotifyAllStatus, NotifyMagics, SmtpConfig, DEFAULT_FAILURE_MESSAGE, DEFAULT_SUCCESS_MESSAGE,
};
use pretty_assertions::assert_eq;

fn magics() -> (NotifyMagics, MemoryDisplaySink) {
    let display = MemoryDisplaySink::default();
    let magics = NotifyMagics::new(Rc::new(display.clone()), "ada");
    (magics, display)
}

fn kinds_and_titles(display: &MemoryDisplaySink) -> Vec<(NotificationKind, Option<String>)> {
    display
        .bundles()
        .iter()
        .map(|bundle| {
            let record = decode_record(bundle, MIME_TYPE).expect("decodable record");
            (record.kind, record.title().map(str::to_string))
        })
        .collect()
}

#[test]
fn loading_publishes_a_single_init_record() {
    let (_magics, display) = magics();
    assert_eq!(kinds_and_titles(&display), vec![(NotificationKind::Init, None)]);
}

#[test]
fn cell_magic_reports_success_and_failure_titles() {
    let (magics, display) = magics();

    let ok = magics
        .notify("", &CellOutcome::succeeded(Some("42".to_string())))
        .expect("notify");
    let failed = magics
        .notify("-f 'It broke'", &CellOutcome::failed("ZeroDivisionError"))
        .expect("notify");

    let Delivery::Desktop { record_id, title } = ok else {
        panic!("expected desktop delivery");
    };
    assert_eq!(title, DEFAULT_SUCCESS_MESSAGE);
    assert!(matches!(failed, Delivery::Desktop { ref title, .. } if title == "It broke"));

    let bundles = display.bundles();
    let record = decode_record(&bundles[1], MIME_TYPE).expect("record");
    assert_eq!(record.id, record_id);
    assert!(!record.processed);
    assert_eq!(
        kinds_and_titles(&display)[1..].to_vec(),
        vec![
            (NotificationKind::Notify, Some(DEFAULT_SUCCESS_MESSAGE.to_string())),
            (NotificationKind::Notify, Some("It broke".to_string())),
        ]
    );
}

#[test]
fn bad_magic_lines_display_nothing() {
    let (magics, display) = magics();
    let err = magics
        .notify("--bogus", &CellOutcome::default())
        .expect_err("unknown flag");
    assert!(matches!(err, KernelError::InvalidArguments { magic: "notify", .. }));
    assert_eq!(display.bundles().len(), 1);
}

#[test]
fn mail_delivery_needs_a_transport() {
    let (magics, display) = magics();
    assert_eq!(
        magics.notify("-m", &CellOutcome::default()),
        Err(KernelError::MailUnavailable)
    );

    let transport = MemoryMailTransport::default();
    let magics = magics.with_mail_transport(Rc::new(transport.clone()));
    let delivery = magics
        .notify("--mail", &CellOutcome::failed("boom"))
        .expect("mail");

    assert_eq!(
        delivery,
        Delivery::Mail {
            subject: DEFAULT_FAILURE_MESSAGE.to_string()
        }
    );
    let sent = transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].body, "boom");
    assert_eq!(sent[0].to, "ada");
    assert_eq!(display.bundles().len(), 1);
}

#[test]
fn smtp_relay_settings_are_checked_when_configured() {
    let (unconfigured, _display) = magics();
    let err = unconfigured
        .with_smtp(SmtpConfig {
            host: String::new(),
            port: 25,
        })
        .expect_err("empty host");
    assert!(matches!(err, KernelError::MailConfiguration(_)), "{err}");

    let (unconfigured, _display) = magics();
    let configured = unconfigured
        .with_smtp(SmtpConfig::default())
        .expect("local relay");
    assert!(format!("{configured:?}").contains("mail_configured: true"));
}

#[test]
fn notify_all_reports_slow_or_failing_cells_only() {
    let (mut magics, display) = magics();
    let status = magics.notify_all("-t 10 -s Done").expect("enable");
    let NotifyAllStatus::Enabled(settings) = status else {
        panic!("expected enabled");
    };
    assert_eq!(settings.threshold_ms, 10_000);

    // The enabling cell itself has no recorded start.
    assert_eq!(magics.post_run_cell_at(&CellOutcome::default(), 50_000), Ok(None));

    magics.pre_run_cell_at(1_000);
    assert_eq!(magics.post_run_cell_at(&CellOutcome::default(), 5_000), Ok(None));

    magics.pre_run_cell_at(1_000);
    let slow = magics
        .post_run_cell_at(&CellOutcome::default(), 11_000)
        .expect("post run");
    assert!(matches!(slow, Some(Delivery::Desktop { ref title, .. }) if title == "Done"));

    magics.pre_run_cell_at(1_000);
    let failed = magics
        .post_run_cell_at(&CellOutcome::failed("boom"), 1_001)
        .expect("post run");
    assert!(matches!(
        failed,
        Some(Delivery::Desktop { ref title, .. }) if title == DEFAULT_FAILURE_MESSAGE
    ));

    assert_eq!(display.bundles().len(), 3);
}

#[test]
fn enabling_twice_keeps_one_hook_and_the_latest_settings() {
    let (mut magics, display) = magics();
    magics.notify_all("").expect("enable");
    magics.notify_all("-t 1").expect("re-enable");
    assert_eq!(
        magics.notify_all_settings().map(|settings| settings.threshold_ms),
        Some(1_000)
    );

    magics.pre_run_cell_at(0);
    magics
        .post_run_cell_at(&CellOutcome::default(), 2_000)
        .expect("post run");
    assert_eq!(display.bundles().len(), 2);
}

#[test]
fn disabling_removes_the_hooks() {
    let (mut magics, display) = magics();
    magics.notify_all("-t 1").expect("enable");
    magics.pre_run_cell_at(0);
    assert_eq!(magics.notify_all("--disable"), Ok(NotifyAllStatus::Disabled));
    assert!(magics.notify_all_settings().is_none());

    assert_eq!(magics.post_run_cell_at(&CellOutcome::failed("boom"), 99_000), Ok(None));
    assert_eq!(display.bundles().len(), 1);

    assert!(magics.notify_all("-d -t 5").is_err());
    assert_eq!(magics.notify_all("-d -t 0"), Ok(NotifyAllStatus::Disabled));
}
