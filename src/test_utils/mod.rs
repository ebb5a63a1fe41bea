#![allow(missing_docs)]

pub(crate) mod collaborators;
pub(crate) mod form;
pub(crate) mod html;
pub(crate) mod http;

pub(crate) use collaborators::{RecordingCollaborators, TEST_TODAY, test_state};
pub(crate) use form::{
    assert_checkbox, assert_form_input, assert_form_input_with_value,
    assert_form_submit_button_with_text, assert_hx_endpoint, must_get_form,
};
pub(crate) use html::{
    assert_valid_html, field_error, parse_html_document, parse_html_fragment, select_all_text,
    select_text,
};
pub(crate) use http::{assert_hx_redirect, assert_redirect, assert_status_ok};
