//! Splash image slot of a launch screen
//!
//! The slot is the image view with id [`SPLASH_IMAGE_ID`] inside the main
//! view, pinned to [`CONTAINER_VIEW_ID`] by four constraints whose ids are
//! derived from their anchors. Attaching an image upserts the view, the
//! constraints and a resource entry; detaching removes them again, so
//! attach, detach, attach leaves the same document as a single attach.

use crate::color::css_color;
use crate::error::{Error, ErrorKind, Result};
use crate::mutate::{find_duplicate_id, remove_by, remove_by_id, upsert_by, upsert_by_id};
use crate::navigate;
use crate::observe::{Event, NoopObserver, Observer};
use crate::schema::{
    absolute_constraints, ContentMode, ImageView, IntoElement, Rect, ResourceImage, ViewAttributes,
};
use crate::tree::{Document, Element};

/// Sentinel id of the splash image view
pub const SPLASH_IMAGE_ID: &str = "EXPO-SplashScreen";
/// Id of the view the splash image is pinned to
pub const CONTAINER_VIEW_ID: &str = "EXPO-ContainerView";
pub const IMAGE_WIDTH: f64 = 414.0;
pub const IMAGE_HEIGHT: f64 = 736.0;

const IMAGE_VIEW: &str = "imageView";
const IMAGE_ATTRIBUTE: &str = "image";
const NAME_ATTRIBUTE: &str = "name";
const KEY_ATTRIBUTE: &str = "key";
const BACKGROUND_COLOR_KEY: &str = "backgroundColor";
const COLOR_TAGS: [&str; 2] = ["color", "nil"];

/// Image view occupying the splash slot
pub fn splash_image_view(image_name: &str, content_mode: ContentMode) -> ImageView {
    ImageView {
        image: image_name.to_string(),
        attributes: ViewAttributes {
            user_label: Some(image_name.to_string()),
            content_mode: Some(content_mode),
            horizontal_hugging_priority: Some(251),
            vertical_hugging_priority: Some(251),
            clips_subviews: Some(true),
            user_interaction_enabled: Some(false),
            translates_autoresizing_mask_into_constraints: Some(false),
            ..ViewAttributes::new(SPLASH_IMAGE_ID)
        },
        frame: Some(Rect::frame(IMAGE_WIDTH, IMAGE_HEIGHT)),
        background_color: None,
    }
}

/// Resource entry for an attached image
pub fn splash_resource(image_name: &str) -> ResourceImage {
    ResourceImage {
        name: image_name.to_string(),
        width: IMAGE_WIDTH,
        height: IMAGE_HEIGHT,
    }
}

/// Ids of the four constraints pinning the splash image
pub fn splash_constraint_ids() -> [String; 4] {
    absolute_constraints(SPLASH_IMAGE_ID, CONTAINER_VIEW_ID).map(|c| c.id())
}

/// Edits the splash slot of one document
pub struct Editor<'a> {
    document: &'a mut Document,
    observer: &'a dyn Observer,
}

impl<'a> Editor<'a> {
    pub fn new(document: &'a mut Document) -> Self {
        Self {
            document,
            observer: &NoopObserver,
        }
    }

    pub fn with_observer(document: &'a mut Document, observer: &'a dyn Observer) -> Self {
        Self { document, observer }
    }

    pub fn document(&self) -> &Document {
        self.document
    }

    /// Show `image_name` in the splash slot.
    ///
    /// Any image previously shown in the slot is replaced. Its resource entry
    /// goes too unless another image view still uses it.
    pub fn attach_image(&mut self, image_name: &str, content_mode: ContentMode) -> Result<()> {
        self.check_paths()?;
        let observer = self.observer;

        let images = navigate::subviews_mut(self.document, IMAGE_VIEW)?;
        let (_, view) = splash_image_view(image_name, content_mode).into_tagged();
        let replaced = upsert_by_id(images, view);
        report_upsert(observer, IMAGE_VIEW, SPLASH_IMAGE_ID, replaced.is_some());

        let previous = replaced
            .as_ref()
            .and_then(|old| old.attr(IMAGE_ATTRIBUTE))
            .map(|name| name.to_wire().into_owned())
            .filter(|name| name != image_name)
            .filter(|name| !images.iter().any(|v| v.attr_matches(IMAGE_ATTRIBUTE, name)));

        let constraints = navigate::constraints_mut(self.document)?;
        for constraint in absolute_constraints(SPLASH_IMAGE_ID, CONTAINER_VIEW_ID) {
            let id = constraint.id();
            let replaced = upsert_by_id(constraints, constraint.into_element());
            report_upsert(observer, navigate::CONSTRAINT, &id, replaced.is_some());
        }

        let resources = navigate::resource_images_mut(self.document)?;
        let (_, resource) = splash_resource(image_name).into_tagged();
        let replaced = upsert_by(resources, NAME_ATTRIBUTE, resource);
        report_upsert(observer, navigate::RESOURCE_IMAGE, image_name, replaced.is_some());
        if let Some(previous) = previous {
            if remove_by(resources, NAME_ATTRIBUTE, &previous).is_some() {
                observer.on_event(&Event::Removed {
                    sequence: navigate::RESOURCE_IMAGE,
                    key: &previous,
                });
            }
        }

        self.verify()
    }

    /// Empty the splash slot and drop the `image_name` resource.
    ///
    /// Removing something that is not there is a no-op. Sequences left empty
    /// are dropped.
    pub fn detach_image(&mut self, image_name: &str) -> Result<()> {
        self.check_paths()?;
        let observer = self.observer;

        let images = navigate::subviews_mut(self.document, IMAGE_VIEW)?;
        if remove_by_id(images, SPLASH_IMAGE_ID).is_some() {
            observer.on_event(&Event::Removed {
                sequence: IMAGE_VIEW,
                key: SPLASH_IMAGE_ID,
            });
        }

        let constraints = navigate::constraints_mut(self.document)?;
        for id in splash_constraint_ids() {
            if remove_by_id(constraints, &id).is_some() {
                observer.on_event(&Event::Removed {
                    sequence: navigate::CONSTRAINT,
                    key: &id,
                });
            }
        }

        let resources = navigate::resource_images_mut(self.document)?;
        if remove_by(resources, NAME_ATTRIBUTE, image_name).is_some() {
            observer.on_event(&Event::Removed {
                sequence: navigate::RESOURCE_IMAGE,
                key: image_name,
            });
        }

        navigate::prune_empty(self.document, IMAGE_VIEW);
        self.verify()
    }

    /// Set the main view background from a CSS color.
    ///
    /// An empty value writes `<nil key="backgroundColor"/>`.
    pub fn set_background_color(&mut self, css: &str) -> Result<()> {
        let (tag, color) = css_color(BACKGROUND_COLOR_KEY, css)?.into_tagged();
        let observer = self.observer;
        let view = navigate::main_view_mut(self.document)?;

        for other in COLOR_TAGS.into_iter().filter(|t| *t != tag) {
            if let Some(seq) = view.children_mut(other) {
                if remove_by(seq, KEY_ATTRIBUTE, BACKGROUND_COLOR_KEY).is_some() {
                    observer.on_event(&Event::Removed {
                        sequence: other,
                        key: BACKGROUND_COLOR_KEY,
                    });
                }
            }
            view.drop_empty(other);
        }

        let replaced = upsert_by(view.sequence_mut(tag), KEY_ATTRIBUTE, color);
        report_upsert(observer, tag, BACKGROUND_COLOR_KEY, replaced.is_some());
        Ok(())
    }

    /// Resolve every path an edit touches before changing anything
    fn check_paths(&self) -> Result<()> {
        navigate::subviews(self.document, IMAGE_VIEW)?;
        navigate::constraints(self.document)?;
        navigate::resource_images(self.document)?;
        Ok(())
    }

    fn verify(&self) -> Result<()> {
        self.check_sequence(IMAGE_VIEW, navigate::subviews(self.document, IMAGE_VIEW)?)?;
        self.check_sequence(navigate::CONSTRAINT, navigate::constraints(self.document)?)
    }

    fn check_sequence(&self, sequence: &str, seq: &[Element]) -> Result<()> {
        match find_duplicate_id(seq) {
            Some(id) => {
                self.observer.on_event(&Event::DuplicateId { sequence, id: &id });
                Err(Error::detached(ErrorKind::DuplicateId { id }))
            }
            None => Ok(()),
        }
    }
}

fn report_upsert(observer: &dyn Observer, sequence: &str, key: &str, replaced: bool) {
    let event = if replaced {
        Event::Replaced { sequence, key }
    } else {
        Event::Appended { sequence, key }
    };
    observer.on_event(&event);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Category;
    use crate::template::{launch_screen, BACKGROUND_IMAGE_NAME};
    use std::cell::RefCell;

    fn names(doc: &Document) -> Result<Vec<String>> {
        Ok(navigate::resource_images(doc)?
            .iter()
            .filter_map(|e| e.attr(NAME_ATTRIBUTE).map(|n| n.to_wire().into_owned()))
            .collect())
    }

    #[test]
    fn test_constraint_ids_are_fixed() {
        assert_eq!(
            splash_constraint_ids(),
            [
                "83fcb9b545b870ba44c24f0feeb116490c499c52",
                "61d16215e44b98e39d0a2c74fdbfaaa22601b12c",
                "f934da460e9ab5acae3ad9987d5b676a108796c1",
                "d6a0be88096b36fb132659aa90203d39139deda9",
            ]
        );
    }

    #[test]
    fn test_attach_fills_slot() -> Result<()> {
        let mut doc = launch_screen();
        Editor::new(&mut doc).attach_image("SplashScreen", ContentMode::ScaleAspectFit)?;

        let images = navigate::subviews(&doc, IMAGE_VIEW)?;
        assert_eq!(images.len(), 2);
        let slot = images.last();
        assert!(slot.is_some_and(|v| v.attr_matches("id", SPLASH_IMAGE_ID)));
        assert!(slot.is_some_and(|v| v.attr_matches("contentMode", "scaleAspectFit")));
        assert!(slot.is_some_and(|v| v.attr_matches("clipsSubviews", "YES")));

        assert_eq!(navigate::constraints(&doc)?.len(), 8);
        assert_eq!(names(&doc)?, [BACKGROUND_IMAGE_NAME, "SplashScreen"]);
        Ok(())
    }

    #[test]
    fn test_attach_twice_is_idempotent() -> Result<()> {
        let mut once = launch_screen();
        Editor::new(&mut once).attach_image("Splash", ContentMode::Center)?;

        let mut twice = once.clone();
        Editor::new(&mut twice).attach_image("Splash", ContentMode::Center)?;

        assert_eq!(once, twice);
        Ok(())
    }

    #[test]
    fn test_shared_previous_resource_is_kept() -> Result<()> {
        let mut doc = launch_screen();
        // Slot shows the background image, which the background view also uses
        Editor::new(&mut doc).attach_image(BACKGROUND_IMAGE_NAME, ContentMode::Center)?;
        Editor::new(&mut doc).attach_image("Other", ContentMode::Center)?;

        assert_eq!(names(&doc)?, [BACKGROUND_IMAGE_NAME, "Other"]);
        Ok(())
    }

    #[test]
    fn test_detach_on_template_is_noop() -> Result<()> {
        let mut doc = launch_screen();
        Editor::new(&mut doc).detach_image("Missing")?;
        assert_eq!(doc, launch_screen());
        Ok(())
    }

    #[test]
    fn test_missing_paths_leave_document_untouched() {
        let mut doc = launch_screen();
        doc.root.children.shift_remove(navigate::RESOURCES);
        let before = doc.clone();

        let err = Editor::new(&mut doc)
            .attach_image("Splash", ContentMode::Center)
            .err();
        assert_eq!(err.map(|e| e.category()), Some(Category::NotFound));
        assert_eq!(doc, before);
    }

    #[test]
    fn test_duplicate_ids_are_reported() -> Result<()> {
        let mut doc = launch_screen();
        let dup = Element::new().with_attr("id", "dup");
        let images = navigate::subviews_mut(&mut doc, IMAGE_VIEW)?;
        images.push(dup.clone());
        images.push(dup);

        let seen = RefCell::new(Vec::new());
        let observer = |event: &Event<'_>| {
            if let Event::DuplicateId { id, .. } = event {
                seen.borrow_mut().push(id.to_string());
            }
        };
        let err = Editor::with_observer(&mut doc, &observer)
            .attach_image("Splash", ContentMode::Center)
            .err();

        assert_eq!(err.map(|e| e.category()), Some(Category::InvariantViolation));
        assert_eq!(seen.borrow().as_slice(), ["dup"]);
        Ok(())
    }

    #[test]
    fn test_events_describe_changes() -> Result<()> {
        let mut doc = launch_screen();
        let seen = RefCell::new(Vec::new());
        let observer = |event: &Event<'_>| seen.borrow_mut().push(format!("{event:?}"));

        Editor::with_observer(&mut doc, &observer).attach_image("Splash", ContentMode::Center)?;
        assert_eq!(seen.borrow().len(), 6);
        assert!(seen.borrow().iter().all(|e| e.starts_with("Appended")));

        seen.borrow_mut().clear();
        Editor::with_observer(&mut doc, &observer).detach_image("Splash")?;
        assert_eq!(seen.borrow().len(), 6);
        assert!(seen.borrow().iter().all(|e| e.starts_with("Removed")));
        Ok(())
    }

    #[test]
    fn test_background_color() -> Result<()> {
        let mut doc = launch_screen();
        let mut editor = Editor::new(&mut doc);

        editor.set_background_color("#ff0000")?;
        let view = navigate::main_view(editor.document())?;
        assert_eq!(view.children("color").len(), 1);
        assert!(view
            .first_child("color")
            .is_some_and(|c| c.attr_matches("red", "1") && c.attr("systemColor").is_none()));

        editor.set_background_color("")?;
        let view = navigate::main_view(editor.document())?;
        assert!(view.children("color").is_empty());
        assert!(view
            .first_child("nil")
            .is_some_and(|n| n.attr_matches("key", BACKGROUND_COLOR_KEY)));

        let err = editor.set_background_color("nope").err();
        assert_eq!(err.map(|e| e.category()), Some(Category::InvalidArgument));
        Ok(())
    }
}
