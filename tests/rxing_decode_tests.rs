//! Decoding synthetic PDF417 symbols through the real rxing backend

use dni_verify::utils::rotation::{RotationAngle, rotate};
use dni_verify::{CancelFlag, ImageBuffer, PipelineConfig, UserSuppliedRecord, VerifyError};
use rxing::{BarcodeFormat, MultiFormatWriter, Writer};

const PAYLOAD: &str = "00512345678@GOMEZ@ANA MARIA@F@30111222@B@05/03/1985@20/10/2016@201";

/// Render `text` as a black-on-white PDF417 symbol with a white border
fn pdf417_image(text: &str) -> ImageBuffer {
    let matrix = MultiFormatWriter::default()
        .encode(text, &BarcodeFormat::PDF_417, 600, 200)
        .expect("failed to encode PDF417");
    let (mw, mh) = (matrix.getWidth() as usize, matrix.getHeight() as usize);
    let border = 20;
    let (w, h) = (mw + 2 * border, mh + 2 * border);

    let mut pixels = vec![255u8; w * h];
    for y in 0..mh {
        for x in 0..mw {
            if matrix.get(x as u32, y as u32) {
                pixels[(y + border) * w + x + border] = 0;
            }
        }
    }
    ImageBuffer::gray(pixels, w, h).unwrap()
}

fn user() -> UserSuppliedRecord {
    UserSuppliedRecord {
        last_names: "Gómez".to_string(),
        first_names: "Ana".to_string(),
        sex: "F".to_string(),
        document_number: "30.111.222".to_string(),
        birth_date_iso: "1985-03-05".to_string(),
    }
}

#[test]
fn decodes_upright_symbol() {
    let front = pdf417_image(PAYLOAD);
    let outcome = dni_verify::verify_identity(
        &front,
        None,
        &user(),
        &PipelineConfig::default(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert!(outcome.validation.ok(), "{:?}", outcome.validation);
    assert_eq!(outcome.record.last_names(), "GOMEZ");
    assert_eq!(outcome.record.first_names(), "ANA MARIA");
}

#[test]
fn decodes_symbol_photographed_sideways() {
    let front = rotate(&pdf417_image(PAYLOAD), RotationAngle::Deg270).unwrap();
    let outcome = dni_verify::verify_identity(
        &front,
        None,
        &user(),
        &PipelineConfig::default(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert!(outcome.validation.ok());
    assert_eq!(outcome.record.document_number(), "30111222");
}

#[test]
fn blank_card_is_not_decodable() {
    let front = ImageBuffer::gray(vec![235u8; 160 * 100], 160, 100).unwrap();
    let err = dni_verify::verify_identity(
        &front,
        None,
        &user(),
        &PipelineConfig::default(),
        &CancelFlag::new(),
    )
    .unwrap_err();

    assert!(matches!(err, VerifyError::NotDecodable { attempts: 24 }));
}
