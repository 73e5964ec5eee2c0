//! Server-rendered HTML pages
//!
//! Deliberately plain markup. Every user-supplied value passes through
//! [`escape`] before it is written into a page.

use axum::response::Html;

use crate::models::Listing;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | Honeylist</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Listings</a> | <a href=\"/admin\">Add listing</a></nav>\n\
         {}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

/// Listing index
pub fn index(listings: &[Listing]) -> Html<String> {
    let mut body = String::from("<h1>Listings</h1>\n");

    if listings.is_empty() {
        body.push_str("<p>No listings yet.</p>\n");
    }

    for listing in listings {
        body.push_str(&format!(
            "<article>\n<a href=\"/listing/{id}\"><img src=\"{image}\" alt=\"{title}\" width=\"240\"></a>\n\
             <h2><a href=\"/listing/{id}\">{title}</a></h2>\n\
             <p>{price} &middot; {beds} bed &middot; {baths} bath</p>\n\
             <p><a href=\"/edit/{id}\">Edit</a></p>\n\
             <form method=\"post\" action=\"/delete/{id}\"><button type=\"submit\">Delete</button></form>\n\
             </article>\n",
            id = listing.id,
            image = escape(&listing.image),
            title = escape(&listing.title),
            price = escape(&listing.price),
            beds = escape(&listing.beds),
            baths = escape(&listing.baths),
        ));
    }

    page("Listings", &body)
}

/// Single listing with its gallery
pub fn detail(listing: &Listing) -> Html<String> {
    let mut body = format!(
        "<h1>{title}</h1>\n<img src=\"{image}\" alt=\"{title}\" width=\"480\">\n\
         <p>Price: {price}</p>\n<p>Beds: {beds} &middot; Baths: {baths}</p>\n\
         <p>{description}</p>\n\
         <p>Contact: <a href=\"mailto:{email}\">{email}</a></p>\n",
        title = escape(&listing.title),
        image = escape(&listing.image),
        price = escape(&listing.price),
        beds = escape(&listing.beds),
        baths = escape(&listing.baths),
        description = escape(&listing.description),
        email = escape(&listing.contact_email),
    );

    let gallery = listing.gallery();
    if !gallery.is_empty() {
        body.push_str("<section class=\"gallery\">\n");
        for path in gallery {
            body.push_str(&format!(
                "<img src=\"{}\" alt=\"\" width=\"240\">\n",
                escape(path)
            ));
        }
        body.push_str("</section>\n");
    }

    page(&listing.title, &body)
}

fn listing_form(action: &str, listing: Option<&Listing>, submit: &str) -> String {
    let value = |field: Option<&str>| field.map(escape).unwrap_or_default();

    format!(
        "<form method=\"post\" action=\"{action}\" enctype=\"multipart/form-data\">\n\
         <label>Title <input name=\"title\" value=\"{title}\" required></label>\n\
         <label>Price <input name=\"price\" value=\"{price}\"></label>\n\
         <label>Beds <input name=\"beds\" value=\"{beds}\"></label>\n\
         <label>Baths <input name=\"baths\" value=\"{baths}\"></label>\n\
         <label>Description <textarea name=\"description\">{description}</textarea></label>\n\
         <label>Images <input type=\"file\" name=\"images\" accept=\"image/*\" multiple></label>\n\
         <button type=\"submit\">{submit}</button>\n</form>\n",
        title = value(listing.map(|l| l.title.as_str())),
        price = value(listing.map(|l| l.price.as_str())),
        beds = value(listing.map(|l| l.beds.as_str())),
        baths = value(listing.map(|l| l.baths.as_str())),
        description = value(listing.map(|l| l.description.as_str())),
    )
}

/// Empty creation form
pub fn admin() -> Html<String> {
    let body = format!(
        "<h1>Add listing</h1>\n{}",
        listing_form("/admin", None, "Create")
    );
    page("Add listing", &body)
}

/// Edit form pre-filled from the stored listing
pub fn edit(listing: &Listing) -> Html<String> {
    let body = format!(
        "<h1>Edit {}</h1>\n{}<p>Uploading new images replaces the current gallery.</p>\n",
        escape(&listing.title),
        listing_form(&format!("/edit/{}", listing.id), Some(listing), "Save")
    );
    page("Edit listing", &body)
}
