use std::rc::Rc;

use telegram_theme::bridge::memory::MemoryBridge;
use telegram_theme::channel::StyleChannel;
use telegram_theme::dom::memory::{MemoryMessage, MemoryMessageList};
use telegram_theme::scheduler::ManualFrameScheduler;
use telegram_theme::settings::Settings;
use telegram_theme::types::MessageAttrs;
use telegram_theme::watcher::WatcherState;
use telegram_theme::{ThemeConfig, ThemePlugin};

fn plugin(config: ThemeConfig) -> ThemePlugin {
    let _ = env_logger::builder().is_test(true).try_init();
    ThemePlugin::new(
        config,
        Rc::new(MemoryBridge::new(Settings::default())),
        StyleChannel::new(),
    )
}

fn other(id: u32, sender: &str) -> MemoryMessage {
    MemoryMessage::new(id.to_string(), MessageAttrs::new(sender, false)).with_height(40.0)
}

fn own(id: u32) -> MemoryMessage {
    MemoryMessage::new(id.to_string(), MessageAttrs::new("me", true)).with_height(40.0)
}

#[test]
fn incoming_messages_regroup_as_they_arrive() {
    let plugin = plugin(ThemeConfig::default());
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([other(1, "alice")]);

    let watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();
    assert_eq!(list.classes(), ["ml-item others-single"]);

    // A burst of three insertions before the next frame
    let records = [
        list.append([other(2, "alice")]),
        list.append([other(3, "alice")]),
        list.append([own(4)]),
    ];
    for record in records {
        watcher.on_mutations(&[record]);
    }
    assert_eq!(watcher.state(), WatcherState::PassScheduled);
    assert_eq!(scheduler.run_frame(), 1);

    assert_eq!(
        list.classes(),
        [
            "ml-item others-head",
            "ml-item others-body",
            "ml-item others-tail",
            "ml-item self-single"
        ]
    );
    assert_eq!(list.get("3").unwrap().avatar_height.as_deref(), Some("149px"));
    assert_eq!(watcher.passes_run(), 2);
}

#[test]
fn older_history_prepended_joins_existing_group() {
    let plugin = plugin(ThemeConfig::default());
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([other(10, "bob"), other(11, "bob")]);

    let watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();
    assert_eq!(list.classes(), ["ml-item others-head", "ml-item others-tail"]);

    watcher.on_mutations(&[list.prepend([other(9, "bob")])]);
    scheduler.run_frame();
    assert_eq!(
        list.classes(),
        [
            "ml-item others-head",
            "ml-item others-body",
            "ml-item others-tail"
        ]
    );
}

#[test]
fn gray_and_timestamp_break_groups() {
    let plugin = plugin(ThemeConfig::default());
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([
        other(1, "carol"),
        MemoryMessage::new("2", MessageAttrs::gray()),
        other(3, "carol"),
        MemoryMessage::new("4", MessageAttrs::new("carol", false).with_timestamp()),
        other(5, "carol"),
    ]);

    let _watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();

    assert_eq!(
        list.classes(),
        [
            "ml-item others-single",
            "ml-item others-single",
            "ml-item others-single",
            "ml-item others-head",
            "ml-item others-tail"
        ]
    );
}

#[test]
fn removals_alone_do_not_trigger_a_pass() {
    let plugin = plugin(ThemeConfig::default());
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([own(1), own(2), own(3)]);

    let watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();

    assert!(!watcher.on_mutations(&[list.remove("2")]));
    assert_eq!(scheduler.run_frame(), 0);
    // Stale until the next insertion
    assert_eq!(list.classes(), ["ml-item self-head", "ml-item self-tail"]);
}

#[test]
fn cache_is_shared_across_containers() {
    let plugin = plugin(ThemeConfig::default());
    let scheduler = Rc::new(ManualFrameScheduler::new());

    let first = Rc::new(MemoryMessageList::new());
    first.append([other(1, "dave"), other(2, "dave")]);
    let watcher = plugin.attach_message_list(first.clone(), scheduler.clone());
    scheduler.run_frame();
    watcher.disconnect();

    // Navigating back renders a fresh container with the same messages
    let second = Rc::new(MemoryMessageList::new());
    second.append([other(1, "dave"), other(2, "dave"), other(3, "dave")]);
    let _watcher = plugin.attach_message_list(second.clone(), scheduler.clone());
    scheduler.run_frame();

    assert_eq!(second.attr_reads(), 1);
    assert_eq!(plugin.cache().borrow().len(), 3);
    assert_eq!(
        second.classes(),
        [
            "ml-item others-head",
            "ml-item others-body",
            "ml-item others-tail"
        ]
    );
}

#[test]
fn legacy_build_reads_newest_first() {
    let config = ThemeConfig {
        host_build_version: Some(27000),
        ..Default::default()
    };
    let plugin = plugin(config);
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([own(3), other(2, "erin"), other(1, "erin")]);

    let _watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();

    assert_eq!(
        list.classes(),
        [
            "ml-item self-single",
            "ml-item others-tail",
            "ml-item others-head"
        ]
    );
    assert_eq!(list.get("2").unwrap().avatar_height.as_deref(), Some("106px"));
}

#[test]
fn custom_spacing_and_offset() {
    let config = ThemeConfig {
        avatar_spacing_px: 0.0,
        avatar_offset_px: 0.0,
        ..Default::default()
    };
    let plugin = plugin(config);
    let scheduler = Rc::new(ManualFrameScheduler::new());
    let list = Rc::new(MemoryMessageList::new());
    list.append([other(1, "f"), other(2, "f")]);

    let _watcher = plugin.attach_message_list(list.clone(), scheduler.clone());
    scheduler.run_frame();
    assert_eq!(list.get("2").unwrap().avatar_height.as_deref(), Some("80px"));
}
