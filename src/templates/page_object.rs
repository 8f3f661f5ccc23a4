//! Page-object sections per action bucket.

use super::{finish, ScaffoldContext, SectionRenderer};
use crate::error::Result;
use crate::routes::ActionBucket;
use askama::Template;

/// Section sources for one bucket
#[derive(Debug, Clone, Copy)]
pub struct PageObjectSections {
    pub elements: &'static [&'static str],
    pub actions: &'static [&'static str],
    pub validations: &'static [&'static str],
    pub helpers: &'static [&'static str],
}

const COMMON_ELEMENTS: &[&str] = &[
    "element :navigation, 'nav'",
    "element :flash_messages, '.flash, .alert, .notice'",
];

const COMMON_VALIDATIONS: &str = r##"def has_correct_title?
  # Customize this based on expected page title
  page.has_css?('h1', text: /{{ controller_title }}/i)
end

def has_flash_message?(type = nil)
  if type
    page.has_css?(".flash.#{type}, .alert-#{type}, .notice")
  else
    flash_messages.present?
  end
end

def loaded?
  # Customize this based on key elements that indicate page is loaded
  page.has_css?('body') && !page.has_css?('.loading')
end"##;

const COMMON_HELPERS: &str = r##"def wait_for_page_load
  # Wait for specific elements or conditions
  page.has_css?('body')
end

def current_path_matches?
  current_path == self.class.path
end"##;

const FORM_ELEMENTS: &[&str] = &[
    "element :form, 'form'",
    r#"element :submit_button, 'input[type="submit"], button[type="submit"]'"#,
    r#"element :cancel_link, 'a[href*="cancel"], .cancel'"#,
    "elements :error_messages, '.field_with_errors, .error, #error_explanation li'",
];

const FORM_SUBMIT_ACTIONS: &str = r##"def submit_form
  submit_button.click
end

def cancel
  cancel_link.click
end

def fill_form_with_valid_data
  # Replace with attributes your model accepts
  fill_form(name: "Sample {{ singular_phrase }}")
end

def fill_form_with_invalid_data
  fill_form(name: "")
end"##;

const FORM_VALIDATIONS: &str = r##"def has_validation_errors?
  error_messages.any?
end

def has_required_fields?
  form.has_css?('[required], .required')
end"##;

const FORM_HELPERS: &str = r##"def form_field_names
  form.all('input, select, textarea').map { |field| field[:name] }.compact
end"##;

const INDEX: PageObjectSections = PageObjectSections {
    elements: &[
        r#"element :search_field, 'input[type="search"]'"#,
        "element :filter_dropdown, 'select.filter'",
        "elements :list_items, '.list-item'",
        "element :pagination, '.pagination'",
        r#"element :new_link, 'a[href*="new"]'"#,
    ],
    actions: &[
        r##"def search_for(term)
  search_field.set(term)
  search_field.send_keys(:return)
end"##,
        r##"def filter_by(value)
  filter_dropdown.select(value)
end"##,
        r##"def click_item(index = 0)
  list_items[index].click
end"##,
        r##"def click_new_link
  new_link.click
end"##,
    ],
    validations: &[
        COMMON_VALIDATIONS,
        r##"def has_items?
  list_items.any?
end

def has_search?
  search_field.present?
end

def has_pagination?
  has_css?('.pagination')
end"##,
    ],
    helpers: &[
        COMMON_HELPERS,
        r##"def item_texts
  list_items.map(&:text)
end"##,
    ],
};

const SHOW: PageObjectSections = PageObjectSections {
    elements: &[
        "element :title, 'h1'",
        r#"element :edit_link, 'a[href*="edit"]'"#,
        r#"element :delete_link, 'a[href*="delete"], button[data-method="delete"]'"#,
    ],
    actions: &[
        r##"def click_edit
  edit_link.click
end"##,
        r##"def click_delete
  delete_link.click
end"##,
    ],
    validations: &[
        COMMON_VALIDATIONS,
        r##"def has_edit_link?
  edit_link.present?
end

def has_delete_link?
  delete_link.present?
end"##,
    ],
    helpers: &[COMMON_HELPERS],
};

const NEW: PageObjectSections = PageObjectSections {
    elements: FORM_ELEMENTS,
    actions: &[
        r##"def fill_form(data = {})
  # Customize this method based on your form fields
  data.each do |field, value|
    form.find_field(field).set(value)
  end
end"##,
        FORM_SUBMIT_ACTIONS,
    ],
    validations: &[COMMON_VALIDATIONS, FORM_VALIDATIONS],
    helpers: &[COMMON_HELPERS, FORM_HELPERS],
};

const EDIT: PageObjectSections = PageObjectSections {
    elements: FORM_ELEMENTS,
    actions: &[
        r##"def update_form(data = {})
  # Customize this method based on your form fields
  data.each do |field, value|
    form.find_field(field).set(value)
  end
end

def fill_form(data = {})
  update_form(data)
end"##,
        FORM_SUBMIT_ACTIONS,
        r##"def clear_field(field)
  form.find_field(field).set('')
end"##,
    ],
    validations: &[
        COMMON_VALIDATIONS,
        FORM_VALIDATIONS,
        r##"def prefilled_with?(field, value)
  form.find_field(field).value == value
end"##,
    ],
    helpers: &[COMMON_HELPERS, FORM_HELPERS],
};

const DESTROY: PageObjectSections = PageObjectSections {
    elements: &[
        r#"element :delete_button, 'a[data-method="delete"], button[data-method="delete"], input[value="Delete"]'"#,
    ],
    actions: &[
        r##"def click_delete
  delete_button.click
end"##,
        r##"def confirm_deletion
  page.driver.browser.switch_to.alert.accept
rescue StandardError
  # No dialog present
end

def cancel_deletion
  page.driver.browser.switch_to.alert.dismiss
rescue StandardError
  # No dialog present
end"##,
    ],
    validations: &[
        COMMON_VALIDATIONS,
        r##"def has_delete_button?
  delete_button.present?
end"##,
    ],
    helpers: &[COMMON_HELPERS],
};

const OTHER: PageObjectSections = PageObjectSections {
    elements: &["element :main_content, 'main, #content, .content'"],
    actions: &[r##"def refresh
  visit(self.class.path)
  wait_for_page_load
end"##],
    validations: &[COMMON_VALIDATIONS],
    helpers: &[COMMON_HELPERS],
};

/// Page-object registry
pub fn sections(bucket: ActionBucket) -> PageObjectSections {
    match bucket {
        ActionBucket::Index => INDEX,
        ActionBucket::Show => SHOW,
        ActionBucket::New | ActionBucket::Create => NEW,
        ActionBucket::Edit | ActionBucket::Update => EDIT,
        ActionBucket::Destroy => DESTROY,
        ActionBucket::Other => OTHER,
    }
}

#[derive(Template)]
#[template(path = "page_object.rb.txt", escape = "none")]
struct PageObjectTemplate<'a> {
    base_page_require: &'a str,
    controller: &'a str,
    action: &'a str,
    verb: &'a str,
    path: &'a str,
    class_name: &'a str,
    path_helper: &'a str,
    url_helper: &'a str,
    elements: String,
    actions: String,
    validations: String,
    helpers: String,
}

/// Full page-object file; `base_page_require` loads `BasePage` relative to it
pub fn render(
    renderer: &SectionRenderer,
    ctx: &ScaffoldContext,
    bucket: ActionBucket,
    base_page_require: &str,
) -> Result<String> {
    let s = sections(bucket);
    let elements: Vec<&str> = s.elements.iter().chain(COMMON_ELEMENTS).copied().collect();
    let template = PageObjectTemplate {
        base_page_require,
        controller: &ctx.controller,
        action: &ctx.action,
        verb: &ctx.verb,
        path: &ctx.path,
        class_name: &ctx.page_class,
        path_helper: &ctx.path_helper,
        url_helper: &ctx.url_helper,
        elements: renderer.render_section(&elements, ctx, "\n", 2)?,
        actions: renderer.render_section(s.actions, ctx, "\n\n", 2)?,
        validations: renderer.render_section(s.validations, ctx, "\n\n", 2)?,
        helpers: renderer.render_section(s.helpers, ctx, "\n\n", 2)?,
    };
    Ok(finish(template.render()?))
}
