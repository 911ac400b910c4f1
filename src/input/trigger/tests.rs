use std::sync::Arc;

use parking_lot::RwLock;

use super::*;
use crate::input::{GamePadButton, Key, MouseButton, State, ThumbStick};
use crate::test_util::{MockGamePad, MockKeyboard, MockMouse, MockTouch};
use crate::{Point, Rectangle};

fn with_keyboard() -> (Devices, Arc<RwLock<MockKeyboard>>) {
    let keyboard = MockKeyboard::shared();
    let mut devices = Devices::default();
    devices.attach_keyboard(&keyboard);
    (devices, keyboard)
}

fn with_mouse() -> (Devices, Arc<RwLock<MockMouse>>) {
    let mouse = MockMouse::shared();
    let mut devices = Devices::default();
    devices.attach_mouse(&mouse);
    (devices, mouse)
}

fn with_touch() -> (Devices, Arc<RwLock<MockTouch>>) {
    let touch = MockTouch::shared();
    let mut devices = Devices::default();
    devices.attach_touch(&touch);
    (devices, touch)
}

fn poll(trigger: &mut impl Trigger, devices: &Devices, delta_time: f32) -> bool {
    trigger.poll(devices, delta_time);
    trigger.was_invoked()
}

#[test]
fn test_state_matches() {
    use State::*;

    let cases = [
        (Pressing, [false, true, false, false]),
        (Pressed, [false, true, true, false]),
        (Releasing, [false, false, false, true]),
        (Released, [true, false, false, true]),
    ];
    for (condition, expected) in cases {
        let actuals = [Released, Pressing, Pressed, Releasing];
        for (actual, expected) in actuals.into_iter().zip(expected) {
            assert_eq!(condition.matches(actual), expected, "{condition} vs {actual}");
        }
    }
}

#[test]
fn test_parse_key_trigger() {
    let trigger: KeyTrigger = "Escape".parse().expect("valid description");
    assert_eq!((trigger.key(), trigger.state()), (Key::Escape, State::Pressing));

    let trigger: KeyTrigger = "  space   released ".parse().expect("valid description");
    assert_eq!((trigger.key(), trigger.state()), (Key::Space, State::Released));
}

#[test]
fn test_parse_errors() {
    assert_eq!(
        "".parse::<KeyTrigger>().map(|_| ()),
        Err(Error::TooFewParameters {
            kind:        TriggerKind::Key,
            expected:    1,
            found:       0,
            description: String::new(),
        }),
    );
    assert_eq!(
        "Escape Sideways".parse::<KeyTrigger>().map(|_| ()),
        Err(Error::InvalidParameter {
            kind:     TriggerKind::Key,
            token:    "Sideways".to_string(),
            expected: "a button state",
        }),
    );
    assert!(matches!(
        "Escape Pressing Twice".parse::<KeyTrigger>(),
        Err(Error::InvalidParameter { token, .. }) if token == "Twice",
    ));
    assert!(matches!(
        "0 0 1".parse::<MouseHoldTrigger>(),
        Err(Error::TooFewParameters { expected: 4, found: 3, .. }),
    ));
    assert!(matches!(
        "Left".parse::<MouseMovementTrigger>(),
        Err(Error::InvalidParameter { .. }),
    ));
}

#[test]
fn test_hold_time_must_be_non_negative() {
    for token in ["-1", "NaN", "inf"] {
        assert_eq!(
            format!("Space {token}").parse::<KeyHoldTrigger>().map(|_| ()),
            Err(Error::InvalidParameter {
                kind:     TriggerKind::KeyHold,
                token:    token.to_string(),
                expected: "a non-negative hold time in seconds",
            }),
        );
    }
    assert!(matches!(
        "0 0 1 1 -0.5".parse::<MouseHoldTrigger>(),
        Err(Error::InvalidParameter { kind: TriggerKind::MouseHold, .. }),
    ));
    assert!(matches!(
        "0 0 1 1 NaN".parse::<TouchHoldTrigger>(),
        Err(Error::InvalidParameter { kind: TriggerKind::TouchHold, .. }),
    ));

    let trigger: KeyHoldTrigger = "Space 0".parse().expect("zero fires on the first held tick");
    assert_eq!(trigger.hold_time(), 0.);
}

#[test]
fn test_create_by_tag() {
    let trigger = create("KeyTrigger", "Escape").expect("KeyTrigger is a known tag");
    assert_eq!(trigger.kind(), TriggerKind::Key);
    assert_eq!(trigger.device(), DeviceKind::Keyboard);
    assert_eq!(trigger.shape(), PayloadShape::None);

    let trigger = create("mousehold", "0 0 0.5 0.5 1 Right").expect("short tags are accepted");
    assert_eq!(trigger.kind(), TriggerKind::MouseHold);
    assert_eq!(trigger.shape(), PayloadShape::Float);

    assert_eq!(
        create("JoystickTrigger", "").map(|_| ()),
        Err(Error::UnknownTriggerKind("JoystickTrigger".to_string())),
    );
    assert_eq!(TriggerKind::GamePadAnalog.to_string(), "GamePadAnalogTrigger");
}

#[test]
fn test_every_kind_parses_its_minimal_description() {
    use strum::IntoEnumIterator;

    for kind in TriggerKind::iter() {
        let description = match kind {
            TriggerKind::Key | TriggerKind::KeyHold => "Enter",
            TriggerKind::MouseButton => "Left",
            TriggerKind::MouseHold | TriggerKind::TouchHold => "0 0 1 1",
            TriggerKind::GamePadButton => "Start",
            TriggerKind::GamePadAnalog => "LeftThumbStick",
            _ => "",
        };
        let trigger = kind.create(description).expect("minimal description is valid");
        assert_eq!(trigger.kind(), kind);
        assert!(!trigger.was_invoked(), "{kind} must not be invoked before polling");
    }
}

#[test]
fn test_key_edges() {
    let (devices, keyboard) = with_keyboard();
    let mut pressing = KeyTrigger::new(Key::A, State::Pressing);
    let mut held = KeyTrigger::new(Key::A, State::Pressed);

    assert!(!poll(&mut pressing, &devices, 1.));

    keyboard.write().press(Key::A);
    assert!(poll(&mut pressing, &devices, 1.));
    assert!(poll(&mut held, &devices, 1.));

    keyboard.write().advance();
    assert!(!poll(&mut pressing, &devices, 1.), "edges only last one tick");
    assert!(poll(&mut held, &devices, 1.));
}

#[test]
fn test_no_retroactive_firing() {
    let (devices, keyboard) = with_keyboard();
    keyboard.write().press(Key::Q);
    keyboard.write().advance();

    let mut trigger = KeyTrigger::new(Key::Q, State::Pressing);
    assert!(!poll(&mut trigger, &devices, 1.), "the edge happened before the trigger existed");

    let mut trigger = KeyTrigger::new(Key::Q, State::Pressed);
    assert!(poll(&mut trigger, &devices, 1.), "the device is already in the matching state");
}

#[test]
fn test_unavailable_or_dropped_device() {
    let (devices, keyboard) = with_keyboard();
    let mut trigger = KeyTrigger::new(Key::Escape, State::Pressed);
    keyboard.write().press(Key::Escape);

    keyboard.write().set_available(false);
    assert!(!poll(&mut trigger, &devices, 1.));
    assert!(!devices.is_available(DeviceKind::Keyboard));

    keyboard.write().set_available(true);
    assert!(poll(&mut trigger, &devices, 1.));

    drop(keyboard);
    assert!(!poll(&mut trigger, &devices, 1.));
    assert!(!devices.is_available(DeviceKind::Keyboard));
}

#[test]
fn test_movement_sentinel() {
    let (devices, mouse) = with_mouse();
    let mut trigger = MouseMovementTrigger::new();

    assert!(!poll(&mut trigger, &devices, 1.), "UNUSED samples are ignored");

    mouse.write().move_to(Point::new(0.5, 0.5));
    assert!(!poll(&mut trigger, &devices, 1.), "the first real sample is only recorded");
    assert!(!poll(&mut trigger, &devices, 1.), "no movement");

    mouse.write().move_to(Point::new(0.6, 0.5));
    assert!(poll(&mut trigger, &devices, 1.));
    assert_eq!(trigger.payload(), Payload::Position(Point::new(0.6, 0.5)));

    trigger.reset();
    mouse.write().move_to(Point::UNUSED);
    assert!(!poll(&mut trigger, &devices, 1.));
    mouse.write().move_to(Point::new(0.6, 0.5));
    assert!(!poll(&mut trigger, &devices, 1.), "compared against the last real sample");
}

#[test]
fn test_mouse_button_payload() {
    let (devices, mouse) = with_mouse();
    let mut trigger: MouseButtonTrigger = "Right".parse().expect("valid description");

    mouse.write().move_to(Point::new(0.25, 0.75));
    mouse.write().press(MouseButton::Left);
    assert!(!poll(&mut trigger, &devices, 1.));

    mouse.write().press(MouseButton::Right);
    assert!(poll(&mut trigger, &devices, 1.));
    assert_eq!(trigger.payload(), Payload::Position(Point::new(0.25, 0.75)));
}

#[test]
fn test_mouse_drag() {
    let (devices, mouse) = with_mouse();
    let mut trigger = MouseDragTrigger::new(MouseButton::Left);
    let start = Point::new(0.1, 0.1);
    let end = Point::new(0.3, 0.4);

    mouse.write().move_to(start);
    mouse.write().press(MouseButton::Left);
    assert!(!poll(&mut trigger, &devices, 1.), "pressing only records the start corner");

    mouse.write().advance();
    assert!(!poll(&mut trigger, &devices, 1.), "holding still does not fire");

    mouse.write().move_to(end);
    assert!(poll(&mut trigger, &devices, 1.));
    assert_eq!(trigger.payload(), Payload::Rectangle(Rectangle::from_corners(start, end)));
    assert_eq!(trigger.delta(), end - start);

    mouse.write().release(MouseButton::Left);
    assert!(!poll(&mut trigger, &devices, 1.));
    assert_eq!(trigger.area(), Rectangle::EMPTY, "release collapses the area");
}

#[test]
fn test_drag_started_before_trigger() {
    let (devices, mouse) = with_mouse();
    mouse.write().move_to(Point::new(0.1, 0.1));
    mouse.write().set(MouseButton::Left, State::Pressed);

    let mut trigger = MouseDragTrigger::new(MouseButton::Left);
    mouse.write().move_to(Point::new(0.2, 0.2));
    assert!(!poll(&mut trigger, &devices, 1.), "the drag started before the trigger existed");
}

#[test]
fn test_touch_drag_collapses_on_unused_position() {
    let (devices, touch) = with_touch();
    let mut trigger = TouchDragTrigger::new();

    touch.write().touch(Point::new(0.1, 0.1));
    assert!(!poll(&mut trigger, &devices, 0.1));

    touch.write().advance();
    touch.write().move_to(Point::new(0.5, 0.5));
    assert!(poll(&mut trigger, &devices, 0.1));
    trigger.reset();

    touch.write().move_to(Point::UNUSED);
    assert!(!poll(&mut trigger, &devices, 0.1));
    assert_eq!(trigger.area(), Rectangle::EMPTY, "losing the position collapses the area");
    assert_eq!(trigger.delta(), Point::ZERO);

    touch.write().move_to(Point::new(0.7, 0.7));
    assert!(!poll(&mut trigger, &devices, 0.1), "a collapsed drag waits for the next press");
    assert_eq!(trigger.area(), Rectangle::EMPTY);
}

#[test]
fn test_key_hold() {
    let (devices, keyboard) = with_keyboard();
    let mut trigger: KeyHoldTrigger = "Space".parse().expect("valid description");
    assert_eq!(trigger.hold_time(), DEFAULT_HOLD_TIME);

    keyboard.write().press(Key::Space);
    assert!(!poll(&mut trigger, &devices, 0.25));

    keyboard.write().advance();
    assert!(poll(&mut trigger, &devices, 0.25));
    assert_eq!(trigger.payload(), Payload::Float(0.5));
    trigger.reset();

    assert!(!poll(&mut trigger, &devices, 0.25), "fires once per press");
    assert!(!poll(&mut trigger, &devices, 1.));

    keyboard.write().release(Key::Space);
    assert!(!poll(&mut trigger, &devices, 0.25));

    keyboard.write().press(Key::Space);
    assert!(!poll(&mut trigger, &devices, 0.25));
    assert!(poll(&mut trigger, &devices, 0.25), "re-armed after release");
}

#[test]
fn test_mouse_hold_area() {
    let (devices, mouse) = with_mouse();
    let area = Rectangle::new(0., 0., 0.5, 0.5);
    let mut trigger = MouseHoldTrigger::new(area, 0.5, MouseButton::Left);

    mouse.write().move_to(Point::new(0.2, 0.2));
    mouse.write().press(MouseButton::Left);
    assert!(!poll(&mut trigger, &devices, 0.3));

    mouse.write().move_to(Point::new(0.8, 0.8));
    assert!(!poll(&mut trigger, &devices, 0.3), "leaving the area resets the timer");

    mouse.write().move_to(Point::new(0.2, 0.2));
    assert!(!poll(&mut trigger, &devices, 0.3));
    assert!(poll(&mut trigger, &devices, 0.3));
    assert!(trigger.payload().float().expect("hold payload is a float") >= 0.5);
}

#[test]
fn test_mouse_zoom() {
    let (devices, mouse) = with_mouse();
    let mut trigger = MouseZoomTrigger::new();

    assert!(!poll(&mut trigger, &devices, 1.), "the first sample is only recorded");

    mouse.write().scroll(2.);
    assert!(poll(&mut trigger, &devices, 1.));
    assert_eq!(trigger.payload(), Payload::Float(2.));

    assert!(!poll(&mut trigger, &devices, 1.));
}

#[test]
fn test_touch() {
    let (devices, touch) = with_touch();
    let mut press = TouchPressTrigger::new(State::Pressing);
    let mut drag = TouchDragTrigger::new();
    let mut hold: TouchHoldTrigger = "0 0 1 1 0.1".parse().expect("valid description");

    touch.write().touch(Point::new(0.4, 0.4));
    assert!(poll(&mut press, &devices, 0.1));
    assert_eq!(press.payload(), Payload::Position(Point::new(0.4, 0.4)));
    assert!(!poll(&mut drag, &devices, 0.1));
    assert!(poll(&mut hold, &devices, 0.1));

    touch.write().advance();
    touch.write().move_to(Point::new(0.5, 0.6));
    assert!(!poll(&mut press, &devices, 0.1));
    assert!(poll(&mut drag, &devices, 0.1));
    assert_eq!(
        drag.payload(),
        Payload::Rectangle(Rectangle::from_corners(Point::new(0.4, 0.4), Point::new(0.5, 0.6))),
    );

    touch.write().lift();
    assert!(!poll(&mut drag, &devices, 0.1));
    assert_eq!(drag.area(), Rectangle::EMPTY);
}

#[test]
fn test_game_pad() {
    let pad = MockGamePad::shared();
    let mut devices = Devices::default();
    devices.attach_game_pad(&pad);

    let mut button: GamePadButtonTrigger = "A".parse().expect("valid description");
    let mut stick: GamePadAnalogTrigger = "RightThumbStick".parse().expect("valid description");
    assert_eq!(stick.stick(), ThumbStick::Right);

    assert!(!poll(&mut button, &devices, 1.));
    assert!(!poll(&mut stick, &devices, 1.), "a centered stick does not fire");

    pad.write().press(GamePadButton::A);
    pad.write().tilt(ThumbStick::Right, Point::new(0.5, -0.5));
    assert!(poll(&mut button, &devices, 1.));
    assert!(poll(&mut stick, &devices, 1.));
    assert_eq!(stick.payload(), Payload::Position(Point::new(0.5, -0.5)));

    pad.write().tilt(ThumbStick::Right, Point::ZERO);
    assert!(!poll(&mut stick, &devices, 1.));
}
