//! Envelope skeletons offered to authors of new scenarios.

/// Payment request with a WS-Security username token.
pub const REQUEST_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Header>
    <wsse:Security xmlns:wsse="http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd">
      <wsse:UsernameToken>
        <wsse:Username>merchant123</wsse:Username>
        <wsse:Password>password123</wsse:Password>
      </wsse:UsernameToken>
    </wsse:Security>
  </soap:Header>
  <soap:Body>
    <ProcessPayment xmlns="http://payment.example.com/">
      <amount>100.00</amount>
      <currency>USD</currency>
      <cardNumber>4111111111111111</cardNumber>
      <expiryDate>12/25</expiryDate>
    </ProcessPayment>
  </soap:Body>
</soap:Envelope>"#;

/// Successful payment response.
pub const RESPONSE_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ProcessPaymentResponse xmlns="http://payment.example.com/">
      <transactionId>txn_123456789</transactionId>
      <status>SUCCESS</status>
      <amount>100.00</amount>
      <currency>USD</currency>
    </ProcessPaymentResponse>
  </soap:Body>
</soap:Envelope>"#;

/// Client fault with placeholder text for the author to replace.
pub const FAULT_TEMPLATE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Client</faultcode>
      <faultstring>Error message here</faultstring>
      <detail>
        <error>Detailed error description</error>
      </detail>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;
