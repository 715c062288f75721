use crashlog_core::model::UuidParseError;
use crashlog_core::{Architecture, BinaryImage, BinaryUuid, StackTraceCall};

#[test]
fn compact_and_hyphenated_uuids_compare_equal() {
    let compact = BinaryUuid::parse("3d1c4e2b8a9f4c7e9b1a2c3d4e5f6a7b").expect("compact");
    let hyphenated = BinaryUuid::parse("3D1C4E2B-8A9F-4C7E-9B1A-2C3D4E5F6A7B").expect("hyphenated");
    assert_eq!(compact, hyphenated);
    assert_eq!(compact.to_string(), "3D1C4E2B-8A9F-4C7E-9B1A-2C3D4E5F6A7B");
}

#[test]
fn invalid_uuid_is_rejected() {
    let err = BinaryUuid::parse("not-a-uuid").unwrap_err();
    assert_eq!(err, UuidParseError("not-a-uuid".to_string()));
    assert!(err.to_string().contains("not-a-uuid"));
}

#[test]
fn uuid_serializes_as_display_string() {
    let uuid: BinaryUuid = "c4d8a1e2-b3f4-4a5c-8d6e-7f8091a2b3c4".parse().expect("parse");
    let json = serde_json::to_string(&uuid).expect("serialize");
    assert_eq!(json, "\"C4D8A1E2-B3F4-4A5C-8D6E-7F8091A2B3C4\"");
    let back: BinaryUuid = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, uuid);
    assert!(serde_json::from_str::<BinaryUuid>("\"xyz\"").is_err());
}

#[test]
fn binary_image_name_defaults_to_file_name() {
    let uuid = BinaryUuid::parse("0a1b2c3d4e5f60718293a4b5c6d7e8f9").unwrap();
    let image = BinaryImage::new("0x1a0f0a000", uuid, "/usr/lib/system/libsystem_kernel.dylib");
    assert_eq!(image.name, "libsystem_kernel.dylib");
    assert_eq!(image.architecture, None);

    let image = image.with_name("kernel").with_architecture(Some(Architecture::Arm64e));
    assert_eq!(image.name, "kernel");
    assert_eq!(image.architecture, Some(Architecture::Arm64e));
}

#[test]
fn image_json_omits_absent_optionals() {
    let uuid = BinaryUuid::parse("0a1b2c3d4e5f60718293a4b5c6d7e8f9").unwrap();
    let image = BinaryImage::new("0x1000", uuid, "/App");
    let value = serde_json::to_value(&image).unwrap();
    assert_eq!(value["load_address"], "0x1000");
    assert_eq!(value["uuid"], "0A1B2C3D-4E5F-6071-8293-A4B5C6D7E8F9");
    assert!(value.get("architecture").is_none());
    assert!(value.get("version").is_none());
}

#[test]
fn stack_trace_call_builder_sets_thread() {
    let call = StackTraceCall::new(3, "MyApp", "0x100e2c4f0", "0x100e24000", 34032);
    assert_eq!(call.thread, None);
    let call = call.with_thread(Some(2));
    assert_eq!(call.thread, Some(2));
    assert_eq!(call.frame_index, 3);
    assert_eq!(call.load_address, "0x100e24000");
}
