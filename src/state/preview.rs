/// Preview handles for the uploaded photo
///
/// Every handle comes from the ledger and must go back to it exactly once.
/// `Preview` is not `Clone` and releasing consumes it; `live()` counts
/// handles that were never given back.

use iced::widget::image;

use crate::upload::PreviewSource;

/// A displayable preview of the current photo
#[derive(Debug)]
pub struct Preview {
    id: u64,
    handle: image::Handle,
}

impl Preview {
    #[cfg(test)]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Image handle for the view (cheap to clone)
    pub fn handle(&self) -> image::Handle {
        self.handle.clone()
    }
}

/// Issues and reclaims preview handles
#[derive(Debug, Default)]
pub struct PreviewLedger {
    issued: u64,
    released: u64,
}

impl PreviewLedger {
    /// Create a preview handle for a photo
    pub fn create(&mut self, source: &PreviewSource) -> Preview {
        let handle = match source {
            PreviewSource::Rgba { width, height, pixels } => {
                image::Handle::from_rgba(*width, *height, pixels.clone())
            }
            PreviewSource::Encoded(bytes) => image::Handle::from_bytes(bytes.clone()),
        };

        self.issued += 1;
        Preview {
            id: self.issued,
            handle,
        }
    }

    /// Give a preview handle back; the pixels are freed with it
    pub fn release(&mut self, preview: Preview) {
        self.released += 1;
        log::debug!("Released preview #{}", preview.id);
        drop(preview);
    }

    /// Number of handles handed out and not yet released
    pub fn live(&self) -> u64 {
        self.issued - self.released
    }

    #[cfg(test)]
    pub fn issued(&self) -> u64 {
        self.issued
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> PreviewSource {
        PreviewSource::Rgba {
            width: 1,
            height: 1,
            pixels: vec![0, 0, 0, 255],
        }
    }

    #[test]
    fn test_create_and_release_pairs_up() {
        let mut ledger = PreviewLedger::default();
        let first = ledger.create(&tiny());
        let second = ledger.create(&PreviewSource::Encoded(vec![1, 2, 3]));
        assert_eq!(ledger.live(), 2);
        assert_ne!(first.id(), second.id());

        ledger.release(first);
        ledger.release(second);
        assert_eq!(ledger.live(), 0);
        assert_eq!(ledger.issued(), 2);
    }
}
