use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Opaque locator of one photo. The GUI treats it as a file path.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ImageRef(String);

crate::impl_string_newtype!(ImageRef);

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    images: Vec<ImageRef>,
}

impl Gallery {
    pub fn new(images: Vec<ImageRef>) -> Self {
        Self { images }
    }

    /// `dir/photo1.ext` through `dir/photoN.ext`.
    pub fn numbered(dir: &Path, count: usize, extension: &str) -> Self {
        let images = (1..=count)
            .map(|n| {
                ImageRef::new(
                    dir.join(format!("photo{n}.{extension}"))
                        .to_string_lossy()
                        .into_owned(),
                )
            })
            .collect();
        Self { images }
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn get(&self, index: usize) -> Option<&ImageRef> {
        self.images.get(index)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

pub fn next_index(index: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (index + 1) % count }
}

pub fn previous_index(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index % count + count - 1) % count
    }
}

/// Full-size viewer over a gallery of `len` photos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lightbox {
    selected: Option<usize>,
    len: usize,
}

impl Lightbox {
    pub fn new(len: usize) -> Self {
        Self {
            selected: None,
            len,
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }

    pub fn open(&mut self, index: usize) {
        if index < self.len {
            self.selected = Some(index);
        }
    }

    pub fn close(&mut self) {
        self.selected = None;
    }

    pub fn next(&mut self) {
        self.selected = self.selected.map(|i| next_index(i, self.len));
    }

    pub fn previous(&mut self) {
        self.selected = self.selected.map(|i| previous_index(i, self.len));
    }

    /// "3 / 12" style position label.
    pub fn counter(&self) -> Option<String> {
        self.selected.map(|i| format!("{} / {}", i + 1, self.len))
    }
}
