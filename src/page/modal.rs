//! "New product" modal.
//!
//! Submitting the form acknowledges the product and clears the form, but
//! nothing is stored: the catalog stays exactly as it was loaded.

use super::{ElementId, FeatureStatus, Page};

/// Acknowledgement shown after a submit.
pub const CREATED_MESSAGE: &str = "Product created successfully!";

/// Inputs of the creation form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Code,
    Description,
    Category,
    Expiration,
    Quantity,
    Price,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Code,
        FormField::Description,
        FormField::Category,
        FormField::Expiration,
        FormField::Quantity,
        FormField::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Code => "Code",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Expiration => "Expiration",
            FormField::Quantity => "Quantity",
            FormField::Price => "Price (R$)",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// Whether `c` may be appended to `current`.
    ///
    /// Quantity takes digits only; price takes digits and one separator.
    fn accepts(self, current: &str, c: char) -> bool {
        match self {
            FormField::Quantity => c.is_ascii_digit(),
            FormField::Price => {
                c.is_ascii_digit() || ((c == '.' || c == ',') && !current.contains(['.', ',']))
            }
            _ => !c.is_control(),
        }
    }
}

/// Values typed into the creation form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    values: [String; 6],
    focus: usize,
}

impl ProductForm {
    pub fn value(&self, field: FormField) -> &str {
        &self.values[field.index()]
    }

    pub fn focused(&self) -> FormField {
        FormField::ALL[self.focus]
    }

    pub fn focus(&mut self, field: FormField) {
        self.focus = field.index();
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FormField::ALL.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FormField::ALL.len() - 1) % FormField::ALL.len();
    }

    /// Type a character into the focused field. Returns whether it was kept.
    pub fn input(&mut self, c: char) -> bool {
        let field = self.focused();
        let value = &mut self.values[field.index()];
        if field.accepts(value, c) {
            value.push(c);
            true
        } else {
            false
        }
    }

    pub fn backspace(&mut self) {
        self.values[self.focus].pop();
    }

    /// Clear every field and move focus back to the first one.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }
}

/// Which modal controls exist on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModalControls {
    pub open: bool,
    pub close: bool,
    pub cancel: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProductModal {
    visible: bool,
    form: ProductForm,
    controls: ModalControls,
}

impl CreateProductModal {
    /// Attach to the modal and its form.
    ///
    /// The open, close and cancel buttons are optional; a missing one just
    /// leaves its action unwired.
    pub fn attach(page: &Page) -> (Option<Self>, FeatureStatus) {
        let status = page.require(&[ElementId::Modal, ElementId::CreateForm]);
        if !status.is_wired() {
            return (None, status);
        }
        let modal = Self {
            visible: false,
            form: ProductForm::default(),
            controls: ModalControls {
                open: page.has(ElementId::NewItemButton),
                close: page.has(ElementId::ModalCloseButton),
                cancel: page.has(ElementId::ModalCancelButton),
            },
        };
        (Some(modal), status)
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn controls(&self) -> ModalControls {
        self.controls
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ProductForm {
        &mut self.form
    }

    /// New-item button.
    pub fn open(&mut self) -> bool {
        if self.controls.open {
            self.visible = true;
        }
        self.controls.open
    }

    /// "X" button: hides the modal, keeping what was typed.
    pub fn close(&mut self) -> bool {
        if self.controls.close {
            self.visible = false;
        }
        self.controls.close
    }

    /// Cancel button: clears the form, then hides the modal.
    pub fn cancel(&mut self) -> bool {
        if self.controls.cancel {
            self.form.reset();
            self.visible = false;
        }
        self.controls.cancel
    }

    /// A click on the backdrop around the modal content.
    pub fn click_outside(&mut self) {
        self.visible = false;
    }

    /// Submit the form: acknowledge, clear, hide.
    ///
    /// Returns the message to show, or `None` if the modal was hidden.
    pub fn submit(&mut self) -> Option<&'static str> {
        if !self.visible {
            return None;
        }
        tracing::info!(code = self.form.value(FormField::Code), "create form submitted");
        self.form.reset();
        self.visible = false;
        Some(CREATED_MESSAGE)
    }
}
