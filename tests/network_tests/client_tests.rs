//! Client Tests
//!
//! Tests for typed calls against a fake hook.

#[path = "../support/mod.rs"]
mod support;

use bizhook::{ByteOrder, Client, ClientConfig, HookError, Reply, Signedness};
use support::FakeHook;

// =============================================================================
// Raw Request Path
// =============================================================================

#[test]
fn test_perform_returns_decoded_reply() {
    support::init_tracing();
    let hook = FakeHook::replying(&[b"2_1234"]);
    let client = hook.client("WRAM");

    let reply = client.perform("WRAM/0/iu2b/").unwrap();
    assert_eq!(reply, Reply::Integer(1234));
    assert_eq!(hook.next_query(), "WRAM/0/iu2b/");
    hook.join();
}

#[test]
fn test_perform_surfaces_remote_error() {
    let hook = FakeHook::replying(&[b"5_domain not found"]);
    let client = hook.client("NOPE");

    match client.perform("NOPE/0/iu1b/") {
        Err(HookError::Remote { code, message }) => {
            assert_eq!(code, 5);
            assert_eq!(message, "domain not found");
        }
        other => panic!("Expected remote error, got {:?}", other),
    }
    hook.join();
}

#[test]
fn test_perform_surfaces_malformed_response() {
    let hook = FakeHook::replying(&[b"garbage"]);
    let client = hook.client("WRAM");

    let err = client.perform("WRAM/0/iu1b/").unwrap_err();
    assert!(matches!(err, HookError::MalformedResponse(_)));
    hook.join();
}

// =============================================================================
// Bytes
// =============================================================================

#[test]
fn test_read_byte() {
    let hook = FakeHook::replying(&[b"1_\xff"]);
    let client = hook.client("WRAM");

    let bytes = client.read_byte(0x10).unwrap();
    assert_eq!(&bytes[..], b"_\xff");
    assert_eq!(hook.next_query(), "WRAM/16/bu1b/");
    hook.join();
}

#[test]
fn test_write_byte() {
    let hook = FakeHook::replying(&[b"0_"]);
    let client = hook.client("WRAM");

    client.write_byte(3, 200).unwrap();
    assert_eq!(hook.next_query(), "WRAM/3/bu1b/200");
    hook.join();
}

// =============================================================================
// Integers
// =============================================================================

#[test]
fn test_read_integer_uses_defaults() {
    let hook = FakeHook::replying(&[b"2_7"]);
    let client = hook.client("WRAM");

    assert_eq!(client.read_integer(100, None, None, None).unwrap(), 7);
    assert_eq!(hook.next_query(), "WRAM/100/iu1b/");
    hook.join();
}

#[test]
fn test_read_integer_configured_defaults() {
    let hook = FakeHook::replying(&[b"2_-2"]);
    let config = ClientConfig::builder("WRAM")
        .port(hook.port())
        .default_signedness(Signedness::Signed)
        .default_width(2)
        .default_order(ByteOrder::Little)
        .build()
        .unwrap();
    let client = Client::new(config);

    assert_eq!(client.read_integer(4, None, None, None).unwrap(), -2);
    assert_eq!(hook.next_query(), "WRAM/4/is2l/");
    hook.join();
}

#[test]
fn test_explicit_parameters_override_defaults() {
    // Explicit values that a truthiness check would treat as unset
    let hook = FakeHook::replying(&[b"0_"]);
    let config = ClientConfig::builder("WRAM")
        .port(hook.port())
        .default_signedness(Signedness::Signed)
        .default_width(4)
        .default_order(ByteOrder::Big)
        .build()
        .unwrap();
    let client = Client::new(config);

    client
        .write_integer(0, 0, Some(Signedness::Unsigned), Some(1), Some(ByteOrder::Little))
        .unwrap();
    assert_eq!(hook.next_query(), "WRAM/0/iu1l/0");
    hook.join();
}

#[test]
fn test_invalid_width_fails_before_io() {
    let client = Client::new(
        ClientConfig::builder("WRAM")
            .port(support::closed_port())
            .build()
            .unwrap(),
    );

    let err = client.read_integer(0, None, Some(5), None).unwrap_err();
    assert!(matches!(err, HookError::InvalidParameter(_)));
}

#[test]
fn test_read_integer_wrong_reply_kind() {
    let hook = FakeHook::replying(&[b"3_1.0"]);
    let client = hook.client("WRAM");

    let err = client.read_integer(0, None, None, None).unwrap_err();
    assert!(matches!(err, HookError::MalformedResponse(_)));
    hook.join();
}

#[test]
fn test_write_integer_remote_rejection() {
    let hook = FakeHook::replying(&[b"6_value out of range"]);
    let client = hook.client("WRAM");

    let err = client.write_u8(0, 300).unwrap_err();
    assert!(err.is_remote());
    assert_eq!(hook.next_query(), "WRAM/0/iu1b/300");
    hook.join();
}

#[test]
fn test_integer_presets() {
    let hook = FakeHook::replying(&[
        b"2_1", b"2_2", b"2_3", b"2_4", b"2_5", b"2_6", b"0_", b"0_", b"2_-1",
    ]);
    let client = hook.client("WRAM");

    assert_eq!(client.read_u16_le(1).unwrap(), 1);
    assert_eq!(hook.next_query(), "WRAM/1/iu2l/");
    assert_eq!(client.read_u24_be(1).unwrap(), 2);
    assert_eq!(hook.next_query(), "WRAM/1/iu3b/");
    assert_eq!(client.read_u32_le(1).unwrap(), 3);
    assert_eq!(hook.next_query(), "WRAM/1/iu4l/");
    assert_eq!(client.read_s16_be(1).unwrap(), 4);
    assert_eq!(hook.next_query(), "WRAM/1/is2b/");
    assert_eq!(client.read_s24_le(1).unwrap(), 5);
    assert_eq!(hook.next_query(), "WRAM/1/is3l/");
    assert_eq!(client.read_s32_be(1).unwrap(), 6);
    assert_eq!(hook.next_query(), "WRAM/1/is4b/");

    client.write_u32_be(2, 70000).unwrap();
    assert_eq!(hook.next_query(), "WRAM/2/iu4b/70000");
    client.write_s16_le(2, -300).unwrap();
    assert_eq!(hook.next_query(), "WRAM/2/is2l/-300");

    assert_eq!(client.read_s8(9).unwrap(), -1);
    assert_eq!(hook.next_query(), "WRAM/9/is1b/");
    hook.join();
}

// =============================================================================
// Floats
// =============================================================================

#[test]
fn test_read_float() {
    let hook = FakeHook::replying(&[b"3_-1.5", b"3_2.25"]);
    let client = hook.client("RAM");

    assert_eq!(client.read_float(0x40, None).unwrap(), -1.5);
    assert_eq!(hook.next_query(), "RAM/64/fs4b/");
    assert_eq!(client.read_float(0x40, Some(ByteOrder::Little)).unwrap(), 2.25);
    assert_eq!(hook.next_query(), "RAM/64/fs4l/");
    hook.join();
}

#[test]
fn test_write_float() {
    let hook = FakeHook::replying(&[b"0_"]);
    let client = hook.client("RAM");

    client.write_float(8, 0.75, None).unwrap();
    assert_eq!(hook.next_query(), "RAM/8/fs4b/0.75");
    hook.join();
}

#[test]
fn test_write_float_rejects_nan_before_io() {
    let client = Client::new(
        ClientConfig::builder("RAM")
            .port(support::closed_port())
            .build()
            .unwrap(),
    );
    let err = client.write_float(0, f64::NAN, None).unwrap_err();
    assert!(matches!(err, HookError::InvalidParameter(_)));
}

// =============================================================================
// Input & Emulator Control
// =============================================================================

#[test]
fn test_control_commands() {
    let hook = FakeHook::replying(&[b"0_", b"0_", b"0_", b"0_"]);
    let client = hook.client("WRAM");

    client.send_input("P1 Start", true).unwrap();
    assert_eq!(hook.next_query(), "0/P1 Start/True/");
    client.advance_frame(2).unwrap();
    assert_eq!(hook.next_query(), "3/0/2/");
    client.save_state().unwrap();
    assert_eq!(hook.next_query(), "3/1/");
    client.load_state().unwrap();
    assert_eq!(hook.next_query(), "3/2/");
    hook.join();
}

#[test]
fn test_control_command_expects_ack() {
    let hook = FakeHook::replying(&[b"2_1"]);
    let client = hook.client("WRAM");

    match client.advance_frame(1).unwrap_err() {
        HookError::MalformedResponse(message) => {
            assert!(message.contains("Advance"), "{}", message);
            assert!(message.contains("integer"), "{}", message);
        }
        other => panic!("Expected malformed response, got {:?}", other),
    }
    hook.join();
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = ClientConfig::new("WRAM");
    assert_eq!(config.host, "127.0.0.1");
    assert_eq!(config.port, 16154);
    assert_eq!(config.default_signedness, Signedness::Unsigned);
    assert_eq!(config.default_width, 1);
    assert_eq!(config.default_order, ByteOrder::Big);
    assert_eq!(config.addr(), "127.0.0.1:16154");
}

#[test]
fn test_config_rejects_bad_default_width() {
    for width in [0u8, 5] {
        let result = ClientConfig::builder("WRAM").default_width(width).build();
        assert!(matches!(result, Err(HookError::InvalidParameter(_))));
    }
}

#[test]
fn test_client_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Client>();
}
