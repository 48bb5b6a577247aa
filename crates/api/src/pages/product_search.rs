//! The public product search page.

use catalog_core::search::{SearchParams, TagMatch};
use catalog_db::models::category::Category;
use catalog_db::models::product::CatalogProduct;
use catalog_db::models::tag::Tag;

use super::{escape_html, layout};

/// Path of the search page. Also the target of the "clear filters" link.
pub const SEARCH_PAGE_PATH: &str = "/products/";

/// Notice shown when the catalog could not be loaded.
pub const UNAVAILABLE_NOTICE: &str =
    "The catalog is temporarily unavailable. Please try again shortly.";

/// Everything the search page displays.
#[derive(Debug)]
pub struct SearchPage<'a> {
    /// Submitted values, echoed back as form state.
    pub params: &'a SearchParams,
    pub products: &'a [CatalogProduct],
    pub categories: &'a [Category],
    pub tags: &'a [Tag],
    pub notice: Option<&'a str>,
}

impl SearchPage<'_> {
    pub fn render(&self) -> String {
        let mut body = String::new();
        body.push_str("<h1>Products</h1>\n");
        if let Some(notice) = self.notice {
            body.push_str(&format!(
                "<p class=\"notice\" role=\"alert\">{}</p>\n",
                escape_html(notice)
            ));
        }
        body.push_str(&self.render_form());
        body.push_str(&self.render_results());
        layout("Product search", &body)
    }

    fn render_form(&self) -> String {
        let mut form = format!(
            "<form class=\"filters\" method=\"get\" action=\"{SEARCH_PAGE_PATH}\">\n\
             <label>Search <input type=\"search\" name=\"search\" value=\"{}\" \
             placeholder=\"Search descriptions\"></label>\n",
            escape_html(&self.params.search)
        );

        form.push_str("<label>Category <select name=\"category\">\n");
        form.push_str("<option value=\"\">All categories</option>\n");
        for category in self.categories {
            let selected = if self.category_selected(category) {
                " selected"
            } else {
                ""
            };
            form.push_str(&format!(
                "<option value=\"{}\"{selected}>{}</option>\n",
                category.id,
                escape_html(&category.name)
            ));
        }
        form.push_str("</select></label>\n");

        if !self.tags.is_empty() {
            form.push_str("<fieldset class=\"tags\"><legend>Tags</legend>\n");
            for tag in self.tags {
                let checked = if self.tag_selected(tag) { " checked" } else { "" };
                form.push_str(&format!(
                    "<label><input type=\"checkbox\" name=\"tags\" value=\"{}\"{checked}> {}</label>\n",
                    tag.id,
                    escape_html(&tag.name)
                ));
            }
            form.push_str("</fieldset>\n");
        }

        form.push_str("<fieldset class=\"tag-match\"><legend>Match</legend>\n");
        for (mode, label) in [(TagMatch::Any, "Any tag"), (TagMatch::All, "All tags")] {
            let checked = if self.params.tag_match == mode {
                " checked"
            } else {
                ""
            };
            form.push_str(&format!(
                "<label><input type=\"radio\" name=\"tag_match\" value=\"{}\"{checked}> {label}</label>\n",
                mode.as_str()
            ));
        }
        form.push_str("</fieldset>\n");

        form.push_str(&format!(
            "<button type=\"submit\">Filter</button>\n\
             <a class=\"clear-filters\" href=\"{SEARCH_PAGE_PATH}\">Clear filters</a>\n\
             </form>\n"
        ));
        form
    }

    fn render_results(&self) -> String {
        if self.products.is_empty() {
            return "<p class=\"empty\">No products match your filters.</p>\n".to_string();
        }

        let mut list = format!(
            "<p class=\"count\">{} product{}</p>\n<ul class=\"products\">\n",
            self.products.len(),
            if self.products.len() == 1 { "" } else { "s" }
        );
        for product in self.products {
            list.push_str(&render_product(product));
        }
        list.push_str("</ul>\n");
        list
    }

    fn category_selected(&self, category: &Category) -> bool {
        self.params.category.as_deref().is_some_and(|selected| {
            selected == category.id.to_string()
                || selected.eq_ignore_ascii_case(&category.name)
                || selected.eq_ignore_ascii_case(&category.slug)
        })
    }

    fn tag_selected(&self, tag: &Tag) -> bool {
        self.params.tags.iter().any(|selected| {
            *selected == tag.id.to_string() || selected.eq_ignore_ascii_case(&tag.name)
        })
    }
}

fn render_product(product: &CatalogProduct) -> String {
    let tags: String = product
        .tags
        .iter()
        .map(|t| format!("<span class=\"tag\">{}</span>", escape_html(&t.name)))
        .collect();
    let stock = if product.product.inventory > 0 {
        format!("{} in stock", product.product.inventory)
    } else {
        "Out of stock".to_string()
    };

    format!(
        "<li class=\"product\" id=\"product-{id}\">\n\
         <h2>{title}</h2>\n\
         <p class=\"description\">{description}</p>\n\
         <p><span class=\"price\">${price}</span> &middot; \
         <span class=\"category\">{category}</span> &middot; \
         <span class=\"stock\">{stock}</span></p>\n\
         <p class=\"tags\">{tags}</p>\n\
         </li>\n",
        id = product.product.id,
        title = escape_html(&product.product.title),
        description = escape_html(&product.product.description),
        price = escape_html(&product.price),
        category = escape_html(&product.category_name),
    )
}
