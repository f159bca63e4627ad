// SPDX-License-Identifier: GPL-3.0-only

//! Raw viewfinder frame to RGB conversion

/// Converts a raw sensor buffer into packed RGB24
pub trait RawFrameConverter: Send {
    /// Convert `raw` (a `width` x `height` frame) into `width * height * 3` RGB bytes
    fn convert(&self, raw: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String>;
}

/// CPU converter for planar I420 (Y plane, quarter U plane, quarter V plane)
#[derive(Debug, Default, Clone, Copy)]
pub struct I420Converter;

impl RawFrameConverter for I420Converter {
    fn convert(&self, raw: &[u8], width: u32, height: u32) -> Result<Vec<u8>, String> {
        let width = width as usize;
        let height = height as usize;
        let y_size = width * height;
        let chroma_w = width / 2;
        let chroma_size = chroma_w * (height / 2);

        if raw.len() < y_size + 2 * chroma_size {
            return Err(format!(
                "I420 data too small: expected {}, got {}",
                y_size + 2 * chroma_size,
                raw.len()
            ));
        }

        let y_plane = &raw[..y_size];
        let u_plane = &raw[y_size..y_size + chroma_size];
        let v_plane = &raw[y_size + chroma_size..y_size + 2 * chroma_size];

        let mut rgb_data = vec![0u8; y_size * 3];
        for y in 0..height {
            let chroma_row = (y / 2) * chroma_w;
            for x in 0..width {
                let chroma_idx = (chroma_row + x / 2).min(chroma_size.saturating_sub(1));
                let (u, v) = if chroma_size > 0 {
                    (u_plane[chroma_idx], v_plane[chroma_idx])
                } else {
                    (128, 128)
                };
                let (r, g, b) = yuv_to_rgb(y_plane[y * width + x], u, v);
                let out = (y * width + x) * 3;
                rgb_data[out] = r;
                rgb_data[out + 1] = g;
                rgb_data[out + 2] = b;
            }
        }

        Ok(rgb_data)
    }
}

/// Convert YUV (BT.601) to RGB
fn yuv_to_rgb(y: u8, u: u8, v: u8) -> (u8, u8, u8) {
    let y = y as f32;
    let u = u as f32 - 128.0;
    let v = v as f32 - 128.0;

    let r = (y + 1.402 * v).clamp(0.0, 255.0) as u8;
    let g = (y - 0.344136 * u - 0.714136 * v).clamp(0.0, 255.0) as u8;
    let b = (y + 1.772 * u).clamp(0.0, 255.0) as u8;

    (r, g, b)
}
