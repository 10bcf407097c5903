use super::*;

fn png(size: usize) -> Attachment {
    Attachment::new("photo.png", "image/png", vec![0; size])
}

#[test]
fn payload_preserves_order_and_repeats() {
    let payload = MultipartPayload::new()
        .text("title", "Luna")
        .file("images", png(3))
        .file("images", Attachment::new("b.jpg", "image/jpeg", vec![1]))
        .text("title", "ignored duplicate");

    assert_eq!(payload.parts().len(), 4);
    assert_eq!(payload.text_value("title"), Some("Luna"));
    assert_eq!(payload.text_value("missing"), None);
    let names: Vec<_> = payload.files("images").into_iter().map(|f| f.file_name.as_str()).collect();
    assert_eq!(names, vec!["photo.png", "b.jpg"]);
}

#[test]
fn validate_image_checks_size_then_type() {
    assert_eq!(validate_image(&png(10), "big", "type"), Ok(()));
    assert_eq!(validate_image(&png(MAX_IMAGE_BYTES + 1), "big", "type"), Err("big".to_owned()));
    let pdf = Attachment::new("r.pdf", "application/pdf", vec![0; 10]);
    assert_eq!(validate_image(&pdf, "big", "type"), Err("type".to_owned()));
}

#[test]
fn from_path_infers_mime_from_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("receipt.JPG");
    std::fs::write(&path, [1, 2, 3]).unwrap();

    let file = Attachment::from_path(&path).unwrap();
    assert_eq!(file.file_name, "receipt.JPG");
    assert_eq!(file.mime_type, "image/jpeg");
    assert!(file.is_image());
    assert_eq!(file.size(), 3);
}

#[test]
fn unknown_extension_is_octet_stream() {
    assert_eq!(mime_for_extension(Some("xyz")), "application/octet-stream");
    assert_eq!(mime_for_extension(None), "application/octet-stream");
}

#[test]
fn size_label_is_megabytes() {
    assert_eq!(png(1024 * 1024).size_label(), "1.00 MB");
}

#[test]
fn into_form_rejects_invalid_mime() {
    let payload = MultipartPayload::new().file("image", Attachment::new("x", "not a mime", vec![]));
    assert_eq!(payload.into_form().err(), Some("not a mime".to_owned()));
}
