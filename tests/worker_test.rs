//! Attachment reads on the worker thread.

use std::io::Write;

use jobboard::worker::{AttachmentPurpose, AttachmentWorker, WorkerMessage, WorkerResponse};
use jobboard::JobBoardError;

fn load(worker: &mut AttachmentWorker, path: &str) -> WorkerResponse {
    worker.handle_message(WorkerMessage::load_attachment(
        AttachmentPurpose::JobImage,
        path.to_string(),
        7,
    ))
}

#[test]
fn loads_file_with_name_and_type() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::File::create(&path).unwrap().write_all(b"\x89PNG").unwrap();

    let response = load(&mut AttachmentWorker::default(), &path.to_string_lossy());
    match response {
        WorkerResponse::AttachmentLoaded {
            purpose,
            mount,
            attachment,
        } => {
            assert_eq!(purpose, AttachmentPurpose::JobImage);
            assert_eq!(mount, 7);
            assert_eq!(attachment.file_name, "logo.png");
            assert_eq!(attachment.content_type, "image/png");
            assert_eq!(attachment.bytes, b"\x89PNG");
        }
        other => panic!("expected attachment, got {other:?}"),
    }
}

#[test]
fn rejects_directories_and_oversized_files() {
    let dir = tempfile::tempdir().unwrap();
    let response = load(&mut AttachmentWorker::default(), &dir.path().to_string_lossy());
    assert!(matches!(response, WorkerResponse::Error { ref message, .. } if message.contains("is not a file")));

    let path = dir.path().join("big.pdf");
    std::fs::write(&path, vec![0u8; 64]).unwrap();
    let response = load(&mut AttachmentWorker::with_limit(16), &path.to_string_lossy());
    assert!(matches!(response, WorkerResponse::Error { ref message, .. } if message.contains("too large")));
}

#[test]
fn blank_path_is_an_error_response() {
    let response = load(&mut AttachmentWorker::default(), "   ");
    assert_eq!(
        response,
        WorkerResponse::Error {
            purpose: AttachmentPurpose::JobImage,
            mount: 7,
            message: "No file selected".to_string(),
        }
    );
}

#[test]
fn payload_round_trip_and_garbage() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cv.pdf");
    std::fs::write(&path, b"%PDF").unwrap();

    let message = WorkerMessage::load_attachment(AttachmentPurpose::Resume, path.to_string_lossy().to_string(), 1);
    let payload = serde_json::to_string(&message).unwrap();

    let mut worker = AttachmentWorker::default();
    let reply: WorkerResponse = serde_json::from_str(&worker.handle_payload(&payload).unwrap()).unwrap();
    assert_eq!(reply.mount(), 1);
    assert_eq!(reply.purpose(), AttachmentPurpose::Resume);

    let err = worker.handle_payload("not json").unwrap_err();
    assert!(matches!(err, JobBoardError::Worker(_)));
}
