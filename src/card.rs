//! The full member card: a one-page printable adhesion form.
//!
//! The layout is a fixed sequence of absolute-position drawing calls
//! carried over from the host application's card template: header block,
//! postal address, membership checkboxes, labeled personal-information
//! rows, agreement sentence, signature block and footnotes. Auto page
//! breaks do not exist here; everything is tuned for one A4 page and
//! content never reflows.

use image::DynamicImage;
use log::debug;

use crate::canvas::{Align, Canvas, FontStyle, PdfSurface, Surface};
use crate::error::CardError;
use crate::i18n::Catalog;
use crate::member::{Member, STATUS_ACTIVE_MEMBER, STATUS_BENEFACTOR_MEMBER};
use crate::preferences::Preferences;

/// Body font size, two below the host's base document size.
const CARD_FONT_SIZE: f32 = 8.0;
/// Width of the label column in the form rows.
const LABEL_WIDTH_MM: f32 = 30.0;
/// Height of one form row.
const ROW_HEIGHT_MM: f32 = 7.0;
/// Checkbox edge length.
const CHECKBOX_MM: f32 = 3.0;
/// Right end of the wide separator rules.
const RULE_RIGHT_MM: f32 = 200.0;
/// Right end of the form-row underlines.
const ROW_RIGHT_MM: f32 = 190.0;
/// Vertical position of the footnote block.
const FOOTNOTES_Y_MM: f32 = 260.0;

/// One printable full member card.
///
/// With a member profile the form comes pre-filled and the checkbox
/// matching the membership status is marked; without one it prints as a
/// blank template to fill in by hand.
pub struct FullCard<'a> {
    member: Option<&'a Member>,
    preferences: &'a Preferences,
    catalog: &'a Catalog,
    logo: Option<&'a DynamicImage>,
}

impl<'a> FullCard<'a> {
    pub fn new(
        member: Option<&'a Member>,
        preferences: &'a Preferences,
        catalog: &'a Catalog,
    ) -> Self {
        Self {
            member,
            preferences,
            catalog,
            logo: None,
        }
    }

    /// Displays `logo` in the page header.
    pub fn with_logo(mut self, logo: &'a DynamicImage) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Default output filename, derived from the translated card token.
    pub fn filename(&self) -> String {
        format!("{}.pdf", self.catalog.tr("fullcard"))
    }

    /// Renders the card and returns the finished PDF bytes.
    pub fn render(&self) -> Result<Vec<u8>, CardError> {
        debug!(
            "rendering full card ({})",
            if self.member.is_some() {
                "pre-filled"
            } else {
                "blank template"
            }
        );
        let surface = PdfSurface::new(self.catalog.tr("Member's full card"))?;
        let mut canvas = Canvas::new(surface);
        canvas.set_margins(10.0, 10.0);
        self.draw_card(&mut canvas);
        canvas.into_surface().into_bytes()
    }

    /// Issues the fixed drawing sequence for the single card page.
    fn draw_card<S: Surface>(&self, c: &mut Canvas<S>) {
        let cat = self.catalog;
        let member = self.member;

        c.set_font(FontStyle::Regular, CARD_FONT_SIZE);
        c.set_text_color(0, 0, 0);

        c.page_header(
            &self.preferences.name,
            Some(cat.tr("Adhesion form")),
            self.logo,
        );

        c.set_draw_color(180, 180, 180);
        c.set_line_width(0.1);

        c.ln(Some(10.0));
        c.line(c.x(), c.y(), RULE_RIGHT_MM, c.y());
        c.ln(Some(2.0));
        c.set_text_color(0, 0, 0);
        c.set_font(FontStyle::Regular, CARD_FONT_SIZE - 1.0);
        c.multi_cell(
            0.0,
            4.0,
            cat.tr(
                "Complete the following form and send it with your funds, \
                 in order to complete your subscription.",
            ),
            Align::Left,
        );

        c.ln(Some(2.0));
        c.set_font(FontStyle::Regular, CARD_FONT_SIZE);
        c.set_x(100.0);
        c.multi_cell(0.0, 4.0, &self.preferences.postal_address, Align::Left);
        c.ln(Some(3.0));
        c.line(c.x(), c.y(), RULE_RIGHT_MM, c.y());

        c.ln(Some(10.0));
        c.set_font(FontStyle::Regular, CARD_FONT_SIZE + 2.0);

        // Membership declaration: three boxes on one line. The first two
        // mark themselves from the member's status code, the donation box
        // never does.
        let box_y = c.y() + 1.0;
        c.write(5.0, cat.tr("Required membership:"));
        self.checkbox(
            c,
            box_y,
            member
                .map(|m| m.status == STATUS_ACTIVE_MEMBER)
                .unwrap_or(false),
        );
        c.write(5.0, cat.tr("Active member"));
        self.checkbox(
            c,
            box_y,
            member
                .map(|m| m.status == STATUS_BENEFACTOR_MEMBER)
                .unwrap_or(false),
        );
        c.write(5.0, cat.tr("Benefactor member"));
        c.set_x(c.x() + 5.0);
        c.rect(c.x(), box_y, CHECKBOX_MM, CHECKBOX_MM);
        c.set_x(c.x() + CHECKBOX_MM);
        c.write(5.0, cat.tr("Donation"));
        c.ln(None);

        c.set_font(FontStyle::Regular, CARD_FONT_SIZE);
        c.write(
            4.0,
            cat.tr(
                "The minimum contribution for each type of membership are \
                 defined on the website of the association. The amount of \
                 donations are free to be decided by the generous donor.",
            ),
        );
        c.ln(Some(20.0));

        c.set_font(FontStyle::Regular, CARD_FONT_SIZE + 2.0);

        // The title row always prints its value cell; the rows below only
        // do so when a member is present.
        c.cell(
            LABEL_WIDTH_MM,
            ROW_HEIGHT_MM,
            cat.tr("Politeness"),
            false,
            false,
            Align::Left,
        );
        let title = member
            .and_then(|m| m.title.as_ref())
            .map(|t| t.long.as_str())
            .unwrap_or("");
        c.cell(0.0, ROW_HEIGHT_MM, title, false, true, Align::Left);
        row_line(c);

        self.labeled_row(c, cat.tr("Name"), member.and_then(|m| m.name.as_deref()));
        self.labeled_row(
            c,
            cat.tr("First name"),
            member.and_then(|m| m.surname.as_deref()),
        );
        self.labeled_row(
            c,
            &format!("{} *", cat.tr("Company name")),
            member.and_then(|m| m.company_name.as_deref()),
        );
        self.labeled_row(
            c,
            cat.tr("Address"),
            member.and_then(|m| m.address.as_deref()),
        );

        // Address continuation: an unlabeled value row plus a spare
        // underline. The skips go through set_y, so x lands back on the
        // left margin each time.
        c.set_y(c.y() + ROW_HEIGHT_MM);
        if let Some(m) = member {
            c.cell(
                0.0,
                ROW_HEIGHT_MM,
                m.address_continuation.as_deref().unwrap_or(""),
                false,
                true,
                Align::Left,
            );
        }
        row_line(c);
        c.set_y(c.y() + ROW_HEIGHT_MM);
        row_line(c);

        // Zip code and city share one row; the zip underline is short.
        let row_y = c.y();
        c.cell(
            LABEL_WIDTH_MM,
            ROW_HEIGHT_MM,
            cat.tr("Zip Code"),
            false,
            member.is_none(),
            Align::Left,
        );
        if let Some(m) = member {
            c.cell(
                0.0,
                ROW_HEIGHT_MM,
                m.zipcode.as_deref().unwrap_or(""),
                false,
                true,
                Align::Left,
            );
        }
        c.line(
            c.x() + LABEL_WIDTH_MM,
            c.y() - 1.0,
            c.x() + LABEL_WIDTH_MM + 15.0,
            c.y() - 1.0,
        );
        c.set_y(row_y);
        c.set_x(c.x() + LABEL_WIDTH_MM + 15.0 + 5.0);
        c.cell(
            LABEL_WIDTH_MM,
            ROW_HEIGHT_MM,
            cat.tr("City"),
            false,
            member.is_none(),
            Align::Left,
        );
        if let Some(m) = member {
            c.cell(
                0.0,
                ROW_HEIGHT_MM,
                m.town.as_deref().unwrap_or(""),
                false,
                true,
                Align::Left,
            );
        }
        c.line(
            c.x() + LABEL_WIDTH_MM + 15.0 + LABEL_WIDTH_MM,
            c.y() - 1.0,
            ROW_RIGHT_MM,
            c.y() - 1.0,
        );

        self.labeled_row(
            c,
            cat.tr("Country"),
            member.and_then(|m| m.country.as_deref()),
        );
        self.labeled_row(
            c,
            cat.tr("Email address"),
            member.and_then(|m| m.email.as_deref()),
        );
        self.labeled_row(
            c,
            &format!("{} **", cat.tr("Username")),
            member.and_then(|m| m.login.as_deref()),
        );

        c.ln(Some(6.0));
        c.cell(
            LABEL_WIDTH_MM,
            ROW_HEIGHT_MM,
            cat.tr("Amount"),
            false,
            true,
            Align::Left,
        );
        row_line(c);

        c.ln(Some(10.0));
        let agreement = cat
            .tr("Hereby, I agree to comply to %s association statutes and its rules.")
            .replace("%s", &self.preferences.name);
        c.write(4.0, &agreement);

        c.ln(Some(10.0));
        c.cell(64.0, 5.0, cat.tr("At "), false, false, Align::Left);
        c.cell(
            0.0,
            5.0,
            cat.tr("On            /            /            "),
            false,
            true,
            Align::Left,
        );
        c.ln(Some(1.0));
        c.cell(0.0, 5.0, cat.tr("Signature"), false, true, Align::Left);

        c.set_y(FOOTNOTES_Y_MM);
        c.set_font(FontStyle::Regular, CARD_FONT_SIZE - 2.0);
        c.cell(
            0.0,
            3.0,
            cat.tr("* Only for companies"),
            false,
            true,
            Align::Right,
        );
        c.cell(
            0.0,
            3.0,
            cat.tr("** Association identifier, if applicable"),
            false,
            true,
            Align::Right,
        );
    }

    /// One labeled form row: label cell, value cell when a member is
    /// present, underline from the value column to the right edge. On a
    /// blank card the label cell itself breaks the line, so rows consume
    /// the same height either way.
    fn labeled_row<S: Surface>(&self, c: &mut Canvas<S>, label: &str, value: Option<&str>) {
        c.cell(
            LABEL_WIDTH_MM,
            ROW_HEIGHT_MM,
            label,
            false,
            self.member.is_none(),
            Align::Left,
        );
        if self.member.is_some() {
            c.cell(
                0.0,
                ROW_HEIGHT_MM,
                value.unwrap_or(""),
                false,
                true,
                Align::Left,
            );
        }
        row_line(c);
    }

    /// One membership checkbox followed by its mark cell. On a blank card
    /// the cursor first steps past the box, which shifts the following
    /// label by the box width.
    fn checkbox<S: Surface>(&self, c: &mut Canvas<S>, box_y: f32, marked: bool) {
        c.set_x(c.x() + 5.0);
        c.rect(c.x(), box_y, CHECKBOX_MM, CHECKBOX_MM);
        if self.member.is_none() {
            c.set_x(c.x() + CHECKBOX_MM);
        }
        c.cell(
            CHECKBOX_MM,
            5.0,
            if marked { "X" } else { "" },
            false,
            false,
            Align::Center,
        );
    }
}

/// Underline below the row just completed, from the value column to the
/// right edge.
fn row_line<S: Surface>(c: &mut Canvas<S>) {
    c.line(
        c.x() + LABEL_WIDTH_MM,
        c.y() - 1.0,
        ROW_RIGHT_MM,
        c.y() - 1.0,
    );
}
